use crate::models::question::AnswerKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub percentage: i64,
}

pub struct GradingService;

impl GradingService {
    /// Scores a submission against the quiz answer key.
    ///
    /// Unanswered questions score nothing and answers for question ids that are
    /// not part of the key are ignored.
    pub fn grade(key: &[AnswerKey], answers: &HashMap<String, String>) -> QuizScore {
        let mut score: i64 = 0;
        let mut correct_answers: i64 = 0;

        for question in key {
            let matched = answers
                .get(&question.question_id.to_string())
                .is_some_and(|given| given == question.correct_answer.as_str());
            if matched {
                score += question.points;
                correct_answers += 1;
            }
        }

        let total_questions = key.len() as i64;
        QuizScore {
            score,
            correct_answers,
            total_questions,
            percentage: percentage(correct_answers, total_questions),
        }
    }
}

/// `round(part / whole * 100)`, with halves rounded up and 0 for an empty whole.
pub fn percentage(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::AnswerOption;

    fn key(entries: &[(i64, AnswerOption, i64)]) -> Vec<AnswerKey> {
        entries
            .iter()
            .map(|&(question_id, correct_answer, points)| AnswerKey {
                question_id,
                correct_answer,
                points,
            })
            .collect()
    }

    fn answers(entries: &[(i64, &str)]) -> HashMap<String, String> {
        entries.iter().map(|&(id, a)| (id.to_string(), a.to_string())).collect()
    }

    #[test]
    fn three_of_five_one_point_questions_is_sixty_percent() {
        let key = key(&[
            (1, AnswerOption::B, 1),
            (2, AnswerOption::A, 1),
            (3, AnswerOption::C, 1),
            (4, AnswerOption::C, 1),
            (5, AnswerOption::B, 1),
        ]);
        let submitted = answers(&[(1, "b"), (2, "a"), (3, "c"), (4, "d"), (5, "a")]);

        let result = GradingService::grade(&key, &submitted);

        assert_eq!(
            result,
            QuizScore {
                score: 3,
                correct_answers: 3,
                total_questions: 5,
                percentage: 60,
            }
        );
    }

    #[test]
    fn empty_quiz_scores_zero_percent() {
        let result = GradingService::grade(&[], &answers(&[(1, "a")]));
        assert_eq!(result.total_questions, 0);
        assert_eq!(result.percentage, 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn points_are_summed_but_percentage_counts_questions() {
        let key = key(&[(10, AnswerOption::A, 5), (11, AnswerOption::D, 1)]);
        let result = GradingService::grade(&key, &answers(&[(10, "a")]));
        assert_eq!(result.score, 5);
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn unknown_and_unanswered_questions_are_ignored() {
        let key = key(&[(1, AnswerOption::A, 1), (2, AnswerOption::B, 1)]);
        let result = GradingService::grade(&key, &answers(&[(2, "b"), (99, "a")]));
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.total_questions, 2);
    }

    #[test]
    fn non_numeric_answer_keys_are_ignored() {
        let key = key(&[(1, AnswerOption::A, 1), (2, AnswerOption::B, 1)]);
        let mut submitted = answers(&[(1, "a")]);
        submitted.insert("extra".to_string(), "b".to_string());
        submitted.insert("".to_string(), "a".to_string());

        let result = GradingService::grade(&key, &submitted);
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn grading_is_repeatable() {
        let key = key(&[(1, AnswerOption::A, 2), (2, AnswerOption::B, 3), (3, AnswerOption::C, 1)]);
        let submitted = answers(&[(1, "a"), (3, "c")]);
        assert_eq!(
            GradingService::grade(&key, &submitted),
            GradingService::grade(&key, &submitted)
        );
    }

    #[test]
    fn percentage_stays_in_range_and_rounds_halves_up() {
        for whole in 0..=12 {
            for part in 0..=whole {
                let p = percentage(part, whole);
                assert!((0..=100).contains(&p), "{}/{} gave {}", part, whole, p);
            }
        }
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
    }
}
