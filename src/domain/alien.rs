/// Aliens: falling tokens, stored in spawn order.

/// Stable spawn-order id. Lower id = spawned earlier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AlienId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub id: AlienId,
    pub code: String,
    pub x: f32,
    pub y: f32,
    /// Vertical pixels per tick.
    pub speed: f32,
    pub angle: f32,
    pub angular_velocity: f32,
    /// Session time (ms) after which a matched alien is removed.
    pub flash_until: Option<f64>,
}

impl Alien {
    /// Matched and waiting out its flash.
    #[inline]
    pub fn is_flash_armed(&self) -> bool {
        self.flash_until.is_some()
    }

    /// Still inside the flash window at `now`.
    #[inline]
    pub fn is_flashing(&self, now: f64) -> bool {
        self.flash_until.map_or(false, |t| now < t)
    }
}

/// Spawn-ordered alien store.
///
/// Ids are handed out by `insert` and never reused, so iteration order
/// and id order always agree.
#[derive(Clone, Debug, Default)]
pub struct AlienArena {
    aliens: Vec<Alien>,
    next_id: u64,
}

impl AlienArena {
    pub fn new() -> Self {
        AlienArena { aliens: Vec::new(), next_id: 0 }
    }

    /// Assign the next id to `alien` and append it.
    pub fn insert(&mut self, mut alien: Alien) -> AlienId {
        let id = AlienId(self.next_id);
        self.next_id += 1;
        alien.id = id;
        self.aliens.push(alien);
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.aliens.iter_mut()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[Alien] {
        &self.aliens
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    pub fn get_mut(&mut self, id: AlienId) -> Option<&mut Alien> {
        self.aliens.iter_mut().find(|a| a.id == id)
    }

    /// Earliest-spawned alien, not yet flash-armed, whose code equals `code`.
    pub fn first_live_matching(&self, code: &str) -> Option<AlienId> {
        self.aliens.iter()
            .find(|a| !a.is_flash_armed() && a.code == code)
            .map(|a| a.id)
    }

    /// Take the current aliens out, leaving the arena empty (ids keep counting).
    pub fn take(&mut self) -> Vec<Alien> {
        std::mem::take(&mut self.aliens)
    }

    /// Replace the contents with the output of a simulation step.
    /// `aliens` must be a spawn-ordered subset of what `take` returned.
    pub fn replace(&mut self, aliens: Vec<Alien>) {
        debug_assert!(aliens.windows(2).all(|w| w[0].id < w[1].id));
        self.aliens = aliens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alien(code: &str) -> Alien {
        Alien {
            id: AlienId(0),
            code: code.to_string(),
            x: 10.0,
            y: 0.0,
            speed: 1.5,
            angle: 0.0,
            angular_velocity: 0.0,
            flash_until: None,
        }
    }

    #[test]
    fn ids_follow_spawn_order() {
        let mut arena = AlienArena::new();
        let a = arena.insert(alien("for"));
        let b = arena.insert(alien("while"));
        assert!(a < b);
        let codes: Vec<_> = arena.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, ["for", "while"]);
    }

    #[test]
    fn ids_are_not_reused_after_take() {
        let mut arena = AlienArena::new();
        arena.insert(alien("for"));
        let taken = arena.take();
        assert_eq!(taken.len(), 1);
        assert!(arena.is_empty());
        let next = arena.insert(alien("if"));
        assert_eq!(next, AlienId(1));
    }

    #[test]
    fn first_live_matching_skips_flash_armed() {
        let mut arena = AlienArena::new();
        let first = arena.insert(alien("for"));
        let second = arena.insert(alien("for"));
        assert_eq!(arena.first_live_matching("for"), Some(first));

        arena.get_mut(first).unwrap().flash_until = Some(150.0);
        assert_eq!(arena.first_live_matching("for"), Some(second));
        assert_eq!(arena.first_live_matching("fo"), None);
    }

    #[test]
    fn flashing_window() {
        let mut a = alien("if");
        assert!(!a.is_flashing(0.0));
        a.flash_until = Some(150.0);
        assert!(a.is_flashing(149.0));
        assert!(!a.is_flashing(150.0));
    }
}
