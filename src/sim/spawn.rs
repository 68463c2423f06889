/// AlienSpawner: builds one new alien at the top of the viewport.
///
/// Placement keeps the rendered word inside `[margin, width - text - margin]`.
/// When the viewport is too narrow for that range, x sticks to the margin.

use rand::Rng;

use crate::config::SessionConfig;
use crate::domain::alien::{Alien, AlienId};
use crate::domain::pool::WordPool;
use crate::ui::surface::TextMeasure;

/// Returns `None` only when the catalog is empty.
/// The returned alien carries a placeholder id; the arena assigns the real one.
pub fn spawn_alien<R: Rng + ?Sized, M: TextMeasure + ?Sized>(
    pool: &WordPool,
    cfg: &SessionConfig,
    viewport_width: f32,
    measure: &M,
    rng: &mut R,
) -> Option<Alien> {
    let code = pool.pick(rng)?.to_string();

    let text_width = measure.measure_text(&code);
    let min_x = cfg.margin_px;
    let max_x = viewport_width - text_width - cfg.margin_px;
    let x = if max_x > min_x {
        rng.random_range(min_x..max_x)
    } else {
        min_x
    };

    let angular_velocity = if cfg.spin_range > 0.0 {
        rng.random_range(-cfg.spin_range..cfg.spin_range)
    } else {
        0.0
    };

    Some(Alien {
        id: AlienId(0),
        speed: pool.speed_of(&code),
        code,
        x,
        y: 0.0,
        angle: 0.0,
        angular_velocity,
        flash_until: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::words::WordList;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// 10px per char, like the terminal surface.
    struct FixedWidth;
    impl TextMeasure for FixedWidth {
        fn measure_text(&self, text: &str) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn pool(codes: &[&str], rng: &mut Pcg32) -> WordPool {
        let list = WordList {
            keywords: codes.iter().map(|s| s.to_string()).collect(),
            primitives: vec![],
        };
        WordPool::build(&list, &SessionConfig::default(), rng)
    }

    #[test]
    fn spawns_within_bounds() {
        let cfg = SessionConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let pool = pool(&["for", "while", "synchronized"], &mut rng);
        for _ in 0..200 {
            let a = spawn_alien(&pool, &cfg, 400.0, &FixedWidth, &mut rng).unwrap();
            let w = FixedWidth.measure_text(&a.code);
            assert!(a.x >= 10.0);
            assert!(a.x + w <= 390.0, "{} at {}", a.code, a.x);
            assert_eq!(a.y, 0.0);
            assert_eq!(a.angle, 0.0);
            assert!(a.angular_velocity.abs() <= 0.05);
            assert!(a.flash_until.is_none());
            assert_eq!(a.speed, pool.speed_of(&a.code));
        }
    }

    #[test]
    fn narrow_viewport_clamps_to_margin() {
        let cfg = SessionConfig::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let pool = pool(&["synchronized"], &mut rng);
        let a = spawn_alien(&pool, &cfg, 50.0, &FixedWidth, &mut rng).unwrap();
        assert_eq!(a.x, 10.0);
    }

    #[test]
    fn empty_catalog_spawns_nothing() {
        let cfg = SessionConfig::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let pool = pool(&[], &mut rng);
        assert!(spawn_alien(&pool, &cfg, 800.0, &FixedWidth, &mut rng).is_none());
    }

    #[test]
    fn code_comes_from_catalog() {
        let cfg = SessionConfig::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let pool = pool(&["for", "while"], &mut rng);
        for _ in 0..20 {
            let a = spawn_alien(&pool, &cfg, 800.0, &FixedWidth, &mut rng).unwrap();
            assert!(a.code == "for" || a.code == "while");
        }
    }
}
