// src/quiz.rs

use crate::constants::*;
use crate::models::{DayPlan, Item, Question, QuestionKind, QuestionSource};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// One item stream of the quiz: the items to ask and how many questions to
/// ask about them. Items are reused round-robin when `target` exceeds them.
#[derive(Debug, Clone, Copy)]
pub struct QuestionPool<'a> {
    pub source: QuestionSource,
    pub items: &'a [Item],
    pub target: usize,
}

impl<'a> QuestionPool<'a> {
    pub fn new(source: QuestionSource, items: &'a [Item], target: usize) -> Self {
        QuestionPool {
            source,
            items,
            target,
        }
    }

    /// The three pools of a planned day, with their question targets.
    pub fn from_plan(plan: &'a DayPlan) -> [QuestionPool<'a>; 3] {
        let new_target = plan.entry.map(|e| e.new).unwrap_or(0);
        [
            QuestionPool::new(QuestionSource::New, &plan.new_items, new_target),
            QuestionPool::new(
                QuestionSource::Review,
                &plan.review_items,
                plan.review_items.len(),
            ),
            QuestionPool::new(QuestionSource::Extra, &plan.extra_mix, plan.extra_mix.len()),
        ]
    }
}

/// Builds each pool's questions, then merges them round-robin.
/// `distractor_items` is the candidate set for wrong answers (the whole catalog).
pub fn generate<R: Rng + ?Sized>(
    pools: &[QuestionPool<'_>],
    distractor_items: &[Item],
    rng: &mut R,
) -> Vec<Question> {
    let per_pool: Vec<Vec<Question>> = pools
        .iter()
        .map(|pool| pool_questions(pool, distractor_items, &mut *rng))
        .collect();
    debug!(
        "Question counts per pool: {:?}",
        per_pool.iter().map(Vec::len).collect::<Vec<_>>()
    );
    interleave(per_pool)
}

/// Takes one question from each non-exhausted list in turn until all are used.
pub fn interleave<T>(lists: Vec<Vec<T>>) -> Vec<T> {
    let total = lists.iter().map(Vec::len).sum();
    let mut iters: Vec<_> = lists.into_iter().map(Vec::into_iter).collect();
    let mut merged = Vec::with_capacity(total);

    while merged.len() < total {
        for it in iters.iter_mut() {
            if let Some(q) = it.next() {
                merged.push(q);
            }
        }
    }
    merged
}

fn pool_questions<R: Rng + ?Sized>(
    pool: &QuestionPool<'_>,
    distractor_items: &[Item],
    rng: &mut R,
) -> Vec<Question> {
    if pool.items.is_empty() || pool.target == 0 {
        return Vec::new();
    }
    (0..pool.target)
        .map(|i| {
            let item = &pool.items[i % pool.items.len()];
            let kind = QuestionKind::ALL[rng.gen_range(0..QuestionKind::ALL.len())];
            build_question(kind, pool.source, item, distractor_items, &mut *rng)
        })
        .collect()
}

pub fn build_question<R: Rng + ?Sized>(
    kind: QuestionKind,
    source: QuestionSource,
    item: &Item,
    distractor_items: &[Item],
    rng: &mut R,
) -> Question {
    let (prompt, instruction, correct) = match kind {
        QuestionKind::Basic => (
            item.character.clone(),
            "이 한자의 훈(뜻)과 음을 맞추세요.".to_string(),
            item.reading(),
        ),
        QuestionKind::Reverse => (
            item.reading(),
            "이 훈음과 맞는 한자를 고르세요.".to_string(),
            item.character.clone(),
        ),
        QuestionKind::WordToGlyph => {
            let word = if rng.gen_bool(0.5) {
                &item.word1
            } else {
                &item.word2
            };
            (
                word.clone(),
                format!("단어 '{}'에 들어간 한자 중 하나를 고르세요.", word),
                item.character.clone(),
            )
        }
        QuestionKind::CommonGlyph => {
            let w1 = item.word1.replacen(&item.character, BLANK_MARKER, 1);
            let w2 = item.word2.replacen(&item.character, BLANK_MARKER, 1);
            (
                format!("{}, {}", w1, w2),
                "괄호 안에 공통으로 들어갈 한자는?".to_string(),
                item.character.clone(),
            )
        }
    };

    let choices = choices_for(kind, item, &correct, distractor_items, rng);
    Question {
        kind,
        source,
        item_id: item.id,
        prompt,
        instruction,
        correct,
        choices,
    }
}

fn answer_text(kind: QuestionKind, item: &Item) -> String {
    match kind {
        QuestionKind::Basic => item.reading(),
        _ => item.character.clone(),
    }
}

fn choices_for<R: Rng + ?Sized>(
    kind: QuestionKind,
    item: &Item,
    correct: &str,
    distractor_items: &[Item],
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let candidates: Vec<String> = distractor_items
        .iter()
        .filter(|other| other.id != item.id)
        .map(|other| answer_text(kind, other))
        .filter(|text| text != correct && seen.insert(text.clone()))
        .collect();
    if candidates.len() < DISTRACTOR_COUNT {
        warn!(
            "Only {} distractors for item {}. Offering {} choices.",
            candidates.len(),
            item.id,
            candidates.len() + 1
        );
    }

    let mut choices: Vec<String> = candidates
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .cloned()
        .collect();
    choices.push(correct.to_string());
    choices.shuffle(rng);
    choices
}

// --- Quiz Run ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong { item_id: u32, lives_left: u32 },
    /// Last question answered correctly.
    Cleared { total: usize },
    /// Ran out of lives on `item_id`.
    Failed { item_id: u32 },
}

impl AnswerOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, AnswerOutcome::Cleared { .. } | AnswerOutcome::Failed { .. })
    }

    pub fn missed_item(&self) -> Option<u32> {
        match self {
            AnswerOutcome::Wrong { item_id, .. } | AnswerOutcome::Failed { item_id } => {
                Some(*item_id)
            }
            _ => None,
        }
    }
}

/// A quiz in progress. Wrong answers keep the learner on the same question.
#[derive(Debug, Clone)]
pub struct QuizRun {
    questions: Vec<Question>,
    cursor: usize,
    wrong_count: u32,
    finished: bool,
}

impl QuizRun {
    pub fn new(questions: Vec<Question>) -> Self {
        let finished = questions.is_empty();
        QuizRun {
            questions,
            cursor: 0,
            wrong_count: 0,
            finished,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.questions.get(self.cursor)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns None once the run is over.
    pub fn answer(&mut self, choice: &str) -> Option<AnswerOutcome> {
        let question = self.current()?;
        let item_id = question.item_id;

        if choice == question.correct {
            self.cursor += 1;
            if self.cursor >= self.questions.len() {
                self.finished = true;
                info!("Quiz cleared: {} questions", self.questions.len());
                return Some(AnswerOutcome::Cleared {
                    total: self.questions.len(),
                });
            }
            return Some(AnswerOutcome::Correct);
        }

        self.wrong_count += 1;
        if self.wrong_count >= QUIZ_LIVES {
            self.finished = true;
            info!("Quiz failed after {} wrong answers", self.wrong_count);
            return Some(AnswerOutcome::Failed { item_id });
        }
        Some(AnswerOutcome::Wrong {
            item_id,
            lives_left: QUIZ_LIVES - self.wrong_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::item;
    use crate::catalog::Catalog;
    use crate::models::Level;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    fn assert_well_formed(q: &Question) {
        assert_eq!(q.choices.len(), CHOICE_COUNT);
        assert_eq!(q.choices.iter().filter(|c| **c == q.correct).count(), 1);
        let unique: HashSet<&String> = q.choices.iter().collect();
        assert_eq!(unique.len(), CHOICE_COUNT);
    }

    #[test]
    fn every_kind_builds_four_unique_choices() {
        let catalog = Catalog::embedded().unwrap();
        let mut rng = rng();
        for it in catalog.all().iter().step_by(7) {
            for kind in QuestionKind::ALL {
                let q = build_question(kind, QuestionSource::New, it, catalog.all(), &mut rng);
                assert_well_formed(&q);
                assert_eq!(q.item_id, it.id);
            }
        }
    }

    #[test]
    fn kinds_use_the_expected_representation() {
        let catalog = Catalog::embedded().unwrap();
        let one = catalog.get(1).unwrap();
        let mut rng = rng();

        let basic = build_question(QuestionKind::Basic, QuestionSource::New, one, catalog.all(), &mut rng);
        assert_eq!(basic.prompt, "一");
        assert_eq!(basic.correct, "한 일");

        let reverse =
            build_question(QuestionKind::Reverse, QuestionSource::New, one, catalog.all(), &mut rng);
        assert_eq!(reverse.prompt, "한 일");
        assert_eq!(reverse.correct, "一");
        assert!(reverse.choices.iter().all(|c| c.chars().count() == 1));

        let word = build_question(
            QuestionKind::WordToGlyph,
            QuestionSource::New,
            one,
            catalog.all(),
            &mut rng,
        );
        assert!(word.prompt == one.word1 || word.prompt == one.word2);
        assert_eq!(word.correct, "一");

        let common = build_question(
            QuestionKind::CommonGlyph,
            QuestionSource::New,
            one,
            catalog.all(),
            &mut rng,
        );
        assert_eq!(common.prompt, "(  )生(일생), (  )月(일월)");
        assert!(!common.prompt.contains('一'));
    }

    #[test]
    fn duplicate_answer_texts_are_not_offered_twice() {
        let mut items: Vec<Item> = (1..=5).map(|id| item(id, "同")).collect();
        items.push(item(6, "他"));
        items.push(item(7, "又"));
        items.push(item(8, "也"));
        let mut rng = rng();
        let q = build_question(QuestionKind::Reverse, QuestionSource::New, &items[7], &items, &mut rng);
        assert_well_formed(&q);
    }

    #[test]
    fn short_distractor_set_offers_what_it_has() {
        let items = vec![item(1, "甲"), item(2, "乙"), item(3, "乙")];
        let mut rng = rng();
        let q = build_question(QuestionKind::Reverse, QuestionSource::New, &items[0], &items, &mut rng);

        assert_eq!(q.choices.len(), 2);
        assert!(q.choices.contains(&"甲".to_string()));
        assert!(q.choices.contains(&"乙".to_string()));
    }

    #[test]
    fn pools_cycle_items_up_to_target() {
        let catalog = Catalog::embedded().unwrap();
        let items = &catalog.level_items(Level::Grade8)[..5];
        let pool = QuestionPool::new(QuestionSource::Review, items, 9);
        let qs = generate(&[pool], catalog.all(), &mut rng());

        let order: Vec<u32> = qs.iter().map(|q| q.item_id).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_pool_or_zero_target_yields_nothing() {
        let catalog = Catalog::embedded().unwrap();
        let items = &catalog.all()[..3];
        let pools = [
            QuestionPool::new(QuestionSource::New, &[], 5),
            QuestionPool::new(QuestionSource::Review, items, 0),
        ];
        assert!(generate(&pools, catalog.all(), &mut rng()).is_empty());
    }

    #[test]
    fn interleaving_never_repeats_a_source_back_to_back() {
        let catalog = Catalog::embedded().unwrap();
        let all = catalog.all();
        for (a, b, c) in [(1, 1, 1), (3, 3, 3), (4, 2, 3), (2, 5, 4), (5, 4, 3)] {
            let pools = [
                QuestionPool::new(QuestionSource::New, &all[0..a], a),
                QuestionPool::new(QuestionSource::Review, &all[10..10 + b], b),
                QuestionPool::new(QuestionSource::Extra, &all[20..20 + c], c),
            ];
            let qs = generate(&pools, all, &mut rng());
            assert_eq!(qs.len(), a + b + c);

            // Adjacency holds while at least two pools are still live.
            let mut sizes = [a, b, c];
            sizes.sort_unstable();
            let multi_pool_prefix = sizes[0] + 2 * sizes[1];
            for w in qs[..multi_pool_prefix].windows(2) {
                assert_ne!(w[0].source, w[1].source);
            }
        }
    }

    #[test]
    fn interleave_takes_round_robin_and_skips_exhausted() {
        let merged = interleave(vec![vec!['a', 'a', 'a'], vec!['b'], vec!['c', 'c']]);
        assert_eq!(merged, vec!['a', 'b', 'c', 'a', 'c', 'a']);
        assert!(interleave::<u8>(vec![vec![], vec![]]).is_empty());
    }

    fn run_of(n: usize) -> QuizRun {
        let catalog = Catalog::embedded().unwrap();
        let items = &catalog.all()[..n];
        let pool = QuestionPool::new(QuestionSource::New, items, n);
        QuizRun::new(generate(&[pool], catalog.all(), &mut rng()))
    }

    fn wrong_choice(q: &Question) -> String {
        q.choices.iter().find(|c| **c != q.correct).cloned().unwrap()
    }

    #[test]
    fn run_clears_after_last_correct_answer() {
        let mut run = run_of(3);
        for _ in 0..2 {
            let correct = run.current().unwrap().correct.clone();
            assert_eq!(run.answer(&correct), Some(AnswerOutcome::Correct));
        }
        let correct = run.current().unwrap().correct.clone();
        assert_eq!(run.answer(&correct), Some(AnswerOutcome::Cleared { total: 3 }));
        assert!(run.is_finished());
        assert!(run.answer(&correct).is_none());
    }

    #[test]
    fn run_fails_on_third_mistake() {
        let mut run = run_of(5);
        let q = run.current().unwrap().clone();
        let wrong = wrong_choice(&q);

        assert_eq!(
            run.answer(&wrong),
            Some(AnswerOutcome::Wrong { item_id: q.item_id, lives_left: 2 })
        );
        // still on the same question
        assert_eq!(run.position(), 0);
        run.answer(&wrong);
        let last = run.answer(&wrong).unwrap();
        assert_eq!(last, AnswerOutcome::Failed { item_id: q.item_id });
        assert_eq!(last.missed_item(), Some(q.item_id));
        assert!(run.current().is_none());
    }

    #[test]
    fn empty_run_is_already_finished() {
        let run = QuizRun::new(Vec::new());
        assert!(run.is_finished());
        assert!(run.current().is_none());
    }
}
