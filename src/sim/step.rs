/// The step function: advances every alien by one tick.
///
/// Processing order, per alien in spawn order:
///   1. Flash expiry: a matched alien whose flash has run out is dropped
///   2. Motion: y += speed, angle += angular_velocity
///   3. Bottom boundary: an alien whose new y reaches `height - miss_threshold`
///      is dropped and reported as a miss
///
/// The step takes the alien list by value and returns the next one. The
/// only side channel is the returned event list; clearing the input buffer
/// on a miss is the caller's job.

use crate::domain::alien::Alien;
use super::event::GameEvent;

pub struct StepOutcome {
    pub aliens: Vec<Alien>,
    /// One `Missed` per alien that crossed the bottom this tick.
    pub events: Vec<GameEvent>,
}

impl StepOutcome {
    pub fn missed(&self) -> bool {
        self.events.iter().any(|e| matches!(e, GameEvent::Missed { .. }))
    }
}

pub fn step(aliens: Vec<Alien>, now: f64, height: f32, miss_threshold: f32) -> StepOutcome {
    let floor = height - miss_threshold;
    let mut events = Vec::new();

    let aliens = aliens.into_iter()
        .filter_map(|mut a| {
            if a.flash_until.map_or(false, |t| now > t) {
                return None;
            }

            a.y += a.speed;
            a.angle += a.angular_velocity;

            if a.y < floor {
                Some(a)
            } else {
                events.push(GameEvent::Missed { id: a.id, code: a.code });
                None
            }
        })
        .collect();

    StepOutcome { aliens, events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alien::AlienId;

    fn alien(id: u64, code: &str, y: f32, speed: f32) -> Alien {
        Alien {
            id: AlienId(id),
            code: code.to_string(),
            x: 10.0,
            y,
            speed,
            angle: 0.0,
            angular_velocity: 0.02,
            flash_until: None,
        }
    }

    #[test]
    fn advances_position_and_angle() {
        let out = step(vec![alien(0, "for", 0.0, 1.5)], 0.0, 800.0, 20.0);
        assert!(out.events.is_empty());
        assert_eq!(out.aliens.len(), 1);
        assert_eq!(out.aliens[0].y, 1.5);
        assert!((out.aliens[0].angle - 0.02).abs() < 1e-6);
    }

    #[test]
    fn zero_motion_is_identity() {
        let mut a = alien(0, "for", 42.0, 0.0);
        a.angular_velocity = 0.0;
        let input = vec![a, { let mut b = alien(1, "if", 7.0, 0.0); b.angular_velocity = 0.0; b }];
        let once = step(input.clone(), 10.0, 800.0, 20.0);
        let twice = step(once.aliens, 10.0, 800.0, 20.0);
        assert_eq!(twice.aliens, input);
        assert!(twice.events.is_empty());
    }

    #[test]
    fn boundary_keep_then_miss() {
        // 779.0 + 0.5 = 779.5 < 780 keeps it; the next tick lands on 780.
        let first = step(vec![alien(3, "while", 779.0, 0.5)], 0.0, 800.0, 20.0);
        assert_eq!(first.aliens.len(), 1);
        assert!(!first.missed());

        let second = step(first.aliens, 16.0, 800.0, 20.0);
        assert!(second.aliens.is_empty());
        assert_eq!(second.events, vec![GameEvent::Missed { id: AlienId(3), code: "while".into() }]);
    }

    #[test]
    fn one_miss_event_per_alien() {
        let aliens = vec![
            alien(0, "for", 779.0, 5.0),
            alien(1, "if", 10.0, 1.5),
            alien(2, "for", 779.5, 5.0),
        ];
        let out = step(aliens, 0.0, 800.0, 20.0);
        assert_eq!(out.aliens.len(), 1);
        assert_eq!(out.aliens[0].id, AlienId(1));
        assert_eq!(out.events.len(), 2);
    }

    #[test]
    fn expired_flash_is_dropped_silently() {
        let mut a = alien(0, "for", 100.0, 1.5);
        a.flash_until = Some(150.0);

        let during = step(vec![a], 150.0, 800.0, 20.0);
        assert_eq!(during.aliens.len(), 1, "still visible at the expiry instant");

        let after = step(during.aliens, 151.0, 800.0, 20.0);
        assert!(after.aliens.is_empty());
        assert!(after.events.is_empty());
    }

    #[test]
    fn preserves_spawn_order() {
        let aliens = (0..5).map(|i| alien(i, "x", i as f32, 1.0)).collect();
        let out = step(aliens, 0.0, 800.0, 20.0);
        let ids: Vec<u64> = out.aliens.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn slow_alien_survives_a_hundred_ticks() {
        let mut aliens = vec![alien(0, "while", 0.0, 1.5)];
        for t in 0..100 {
            let out = step(aliens, t as f64 * 16.0, 800.0, 20.0);
            assert!(out.events.is_empty());
            aliens = out.aliens;
        }
        assert_eq!(aliens.len(), 1);
        assert!((aliens[0].y - 150.0).abs() < 1e-3);
    }
}
