/// WordPool: the per-session token catalog and its fall speeds.
///
/// The catalog is the de-duplicated union of a language's keywords and
/// primitives (first occurrence wins, keywords first). A random sample of
/// the catalog is put in the "fast lane" with an elevated speed; everything
/// else falls at the default speed. Both are fixed for the whole session.

use std::collections::{HashMap, HashSet};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::SessionConfig;
use super::words::WordList;

#[derive(Clone, Debug)]
pub struct WordPool {
    catalog: Vec<String>,
    fast_lane: HashMap<String, f32>,
    default_speed: f32,
}

impl WordPool {
    pub fn build<R: Rng + ?Sized>(words: &WordList, cfg: &SessionConfig, rng: &mut R) -> Self {
        let mut seen = HashSet::new();
        let catalog: Vec<String> = words.keywords.iter()
            .chain(words.primitives.iter())
            .filter(|w| seen.insert(w.as_str()))
            .cloned()
            .collect();

        let count = cfg.fast_lane_count.min(catalog.len());
        let chosen: Vec<String> = catalog.choose_multiple(rng, count).cloned().collect();
        let fast_lane = chosen.into_iter()
            .map(|code| (code, fast_speed(cfg, rng)))
            .collect();

        WordPool {
            catalog,
            fast_lane,
            default_speed: cfg.default_speed,
        }
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Fall speed for `code`: its fast-lane speed, or the default.
    pub fn speed_of(&self, code: &str) -> f32 {
        self.fast_lane.get(code).copied().unwrap_or(self.default_speed)
    }

    pub fn fast_lane(&self) -> &HashMap<String, f32> {
        &self.fast_lane
    }

    /// Uniform pick from the catalog; `None` when it is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.catalog.choose(rng).map(String::as_str)
    }
}

fn fast_speed<R: Rng + ?Sized>(cfg: &SessionConfig, rng: &mut R) -> f32 {
    if cfg.fast_speed_range > 0.0 {
        rng.random_range(cfg.fast_speed_min..cfg.fast_speed_min + cfg.fast_speed_range)
    } else {
        cfg.fast_speed_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn words(keywords: &[&str], primitives: &[&str]) -> WordList {
        WordList {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            primitives: primitives.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn catalog_is_deduplicated_union() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pool = WordPool::build(
            &words(&["int", "for", "while"], &["int", "char", "for"]),
            &SessionConfig::default(),
            &mut rng,
        );
        assert_eq!(pool.catalog(), ["int", "for", "while", "char"]);
    }

    #[test]
    fn catalog_is_case_sensitive() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pool = WordPool::build(&words(&["None", "none"], &[]), &SessionConfig::default(), &mut rng);
        assert_eq!(pool.catalog().len(), 2);
    }

    #[test]
    fn fast_lane_is_capped_by_catalog_size() {
        let mut rng = Pcg32::seed_from_u64(7);
        let pool = WordPool::build(&words(&["for", "while"], &[]), &SessionConfig::default(), &mut rng);
        assert_eq!(pool.fast_lane().len(), 2);
    }

    #[test]
    fn fast_lane_samples_fixed_count_within_range() {
        let cfg = SessionConfig::default();
        let keywords: Vec<String> = (0..40).map(|i| format!("kw{i}")).collect();
        let list = WordList { keywords, primitives: vec![] };
        let mut rng = Pcg32::seed_from_u64(99);
        let pool = WordPool::build(&list, &cfg, &mut rng);

        assert_eq!(pool.fast_lane().len(), 10);
        for (code, &speed) in pool.fast_lane() {
            assert!(pool.catalog().contains(code));
            assert!((4.0..6.0).contains(&speed), "{code} speed {speed}");
            assert_eq!(pool.speed_of(code), speed);
        }
        let slow = pool.catalog().iter()
            .find(|c| !pool.fast_lane().contains_key(*c))
            .unwrap();
        assert_eq!(pool.speed_of(slow), 1.5);
    }

    #[test]
    fn same_seed_same_assignment() {
        let cfg = SessionConfig::default();
        let list = crate::domain::words::embedded(crate::domain::language::Language::Java);
        let a = WordPool::build(&list, &cfg, &mut Pcg32::seed_from_u64(5));
        let b = WordPool::build(&list, &cfg, &mut Pcg32::seed_from_u64(5));
        assert_eq!(a.catalog(), b.catalog());
        assert_eq!(a.fast_lane(), b.fast_lane());
    }

    #[test]
    fn empty_catalog_is_legal() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pool = WordPool::build(&WordList::default(), &SessionConfig::default(), &mut rng);
        assert!(pool.is_empty());
        assert!(pool.fast_lane().is_empty());
        assert_eq!(pool.pick(&mut rng), None);
    }

    #[test]
    fn zero_range_uses_min_speed() {
        let cfg = SessionConfig { fast_speed_range: 0.0, ..SessionConfig::default() };
        let mut rng = Pcg32::seed_from_u64(3);
        let pool = WordPool::build(&words(&["if"], &[]), &cfg, &mut rng);
        assert_eq!(pool.speed_of("if"), 4.0);
    }
}
