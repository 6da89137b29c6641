// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Question synthesis — one randomly-kinded question per sentence.
//
// The kind is picked by a two-draw cascade: the first uniform draw selects
// multiple-choice below `multiple_choice_threshold`; otherwise a second draw
// selects short-answer below `short_answer_threshold` and true/false above
// it. With the default thresholds the split is about 33% / 33.5% / 33.5%.

use examwerk_core::config::{DISTRACTORS_PER_QUESTION, SynthesisSettings};
use examwerk_core::types::{Question, QuestionKind};
use rand::Rng;
use rand::seq::SliceRandom;

/// Turns sentences into questions using a caller-supplied random source.
#[derive(Debug, Clone, Default)]
pub struct QuestionSynthesizer {
    settings: SynthesisSettings,
}

impl QuestionSynthesizer {
    pub fn new(settings: SynthesisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    /// Build one question for `sentence`. Never fails; an empty sentence
    /// still yields a well-formed question.
    pub fn synthesize<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> Question {
        match self.choose_kind(rng) {
            QuestionKind::MultipleChoice => self.multiple_choice(sentence, rng),
            QuestionKind::ShortAnswer => Question::short_answer(sentence),
            QuestionKind::TrueFalse => Question::true_false(sentence, draw(rng) > 0.5),
        }
    }

    pub fn choose_kind<R: Rng + ?Sized>(&self, rng: &mut R) -> QuestionKind {
        if draw(rng) < self.settings.multiple_choice_threshold {
            QuestionKind::MultipleChoice
        } else if draw(rng) < self.settings.short_answer_threshold {
            QuestionKind::ShortAnswer
        } else {
            QuestionKind::TrueFalse
        }
    }

    /// The sentence plus three distractors sampled without replacement, in
    /// shuffled order. Pool entries are not compared with the sentence, so a
    /// sentence that equals one of them can appear twice among the choices.
    fn multiple_choice<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> Question {
        let mut options: Vec<String> = self
            .settings
            .distractors
            .choose_multiple(rng, DISTRACTORS_PER_QUESTION)
            .cloned()
            .collect();
        options.push(sentence.to_owned());
        options.shuffle(rng);
        Question::multiple_choice(sentence, options)
    }
}

/// Uniform draw from [0, 1).
fn draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use examwerk_core::types::QuestionBody;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn always(kind_threshold_mc: f64, kind_threshold_sa: f64) -> QuestionSynthesizer {
        QuestionSynthesizer::new(SynthesisSettings {
            multiple_choice_threshold: kind_threshold_mc,
            short_answer_threshold: kind_threshold_sa,
            ..SynthesisSettings::default()
        })
    }

    #[test]
    fn multiple_choice_has_four_labelled_choices() {
        let synthesizer = always(1.0, 0.5);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let q = synthesizer.synthesize("Water boils at 100C.", &mut rng);
            assert_eq!(q.kind, QuestionKind::MultipleChoice);

            let choices = q.choices().unwrap();
            let labels: Vec<char> = choices.iter().map(|c| c.label).collect();
            assert_eq!(labels, ['A', 'B', 'C', 'D']);
            assert_eq!(
                choices.iter().filter(|c| c.text == "Water boils at 100C.").count(),
                1
            );
            let distinct: HashSet<&str> = choices.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(distinct.len(), 4);
        }
    }

    #[test]
    fn correct_answer_position_varies() {
        let synthesizer = always(1.0, 0.5);
        let mut rng = StdRng::seed_from_u64(11);
        let positions: HashSet<usize> = (0..100)
            .map(|_| {
                let q = synthesizer.synthesize("Answer.", &mut rng);
                q.choices().unwrap().iter().position(|c| c.text == "Answer.").unwrap()
            })
            .collect();
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn distractors_come_from_the_pool() {
        let synthesizer = QuestionSynthesizer::new(SynthesisSettings {
            multiple_choice_threshold: 1.0,
            distractors: (1..=6).map(|n| format!("Option {n}")).collect(),
            ..SynthesisSettings::default()
        });
        let pool = &synthesizer.settings().distractors;
        let mut rng = StdRng::seed_from_u64(3);
        let q = synthesizer.synthesize("Truth.", &mut rng);
        for choice in q.choices().unwrap().iter().filter(|c| c.text != "Truth.") {
            assert!(pool.contains(&choice.text));
        }
    }

    #[test]
    fn second_draw_splits_short_answer_and_true_false() {
        let mut rng = StdRng::seed_from_u64(5);
        let short = always(0.0, 1.0).synthesize("Cells divide.", &mut rng);
        assert_eq!(short.kind, QuestionKind::ShortAnswer);
        assert_eq!(short.body, QuestionBody::OpenResponse);

        let tf = always(0.0, 0.0).synthesize("Cells divide.", &mut rng);
        assert_eq!(tf.kind, QuestionKind::TrueFalse);
        let rendered = tf.to_string();
        assert!(
            rendered.ends_with("Correct Answer: True") || rendered.ends_with("Correct Answer: False")
        );
    }

    #[test]
    fn zero_draws_pick_multiple_choice() {
        // StepRng(0, 0) yields 0.0 for every uniform draw.
        let mut rng = StepRng::new(0, 0);
        let q = QuestionSynthesizer::default().synthesize("Zero.", &mut rng);
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
    }

    #[test]
    fn kind_frequencies_follow_the_cascade() {
        let synthesizer = QuestionSynthesizer::default();
        let mut rng = StdRng::seed_from_u64(2026);
        let (mut mc, mut sa, mut tf) = (0usize, 0usize, 0usize);
        for _ in 0..30_000 {
            match synthesizer.choose_kind(&mut rng) {
                QuestionKind::MultipleChoice => mc += 1,
                QuestionKind::ShortAnswer => sa += 1,
                QuestionKind::TrueFalse => tf += 1,
            }
        }
        let share = |n: usize| n as f64 / 30_000.0;
        assert!((share(mc) - 0.33).abs() < 0.02, "mc share {}", share(mc));
        assert!((share(sa) - 0.335).abs() < 0.02, "sa share {}", share(sa));
        assert!((share(tf) - 0.335).abs() < 0.02, "tf share {}", share(tf));
    }

    #[test]
    fn true_false_answers_are_both_drawn() {
        let synthesizer = always(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(9);
        let answers: HashSet<bool> = (0..64)
            .map(|_| match synthesizer.synthesize("X.", &mut rng).body {
                QuestionBody::TrueFalse { answer } => answer,
                other => panic!("expected true/false body, got {other:?}"),
            })
            .collect();
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn same_seed_same_questions() {
        let synthesizer = QuestionSynthesizer::default();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            ["One.", "Two.", "Three.", "Four."]
                .iter()
                .map(|s| synthesizer.synthesize(s, &mut rng).to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn sentence_equal_to_a_pool_entry_is_not_filtered() {
        let synthesizer = always(1.0, 0.5);
        let mut rng = StdRng::seed_from_u64(13);
        let q = synthesizer.synthesize("Example A", &mut rng);

        let choices = q.choices().unwrap();
        assert_eq!(choices.len(), 4);
        assert_eq!(choices.iter().filter(|c| c.text == "Example A").count(), 2);
    }

    #[test]
    fn empty_sentence_still_renders() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = always(1.0, 0.5).synthesize("", &mut rng);
        assert!(q.to_string().starts_with("What does the following mean: ''?"));
        assert_eq!(q.choices().unwrap().len(), 4);
    }
}
