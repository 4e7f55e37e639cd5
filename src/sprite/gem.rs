use super::{grid_position, Entity, Frame, ScoreKeeper, Sprite, LANES, NUM_COLS};
use crate::engine::Point;
use crate::util::random_int_inclusive;
use rand::Rng;

/// Gem colours, each with a fixed reward and lifetime
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GemKind {
    Blue,
    Green,
    Orange,
}

impl GemKind {
    pub const ALL: [GemKind; 3] = [GemKind::Blue, GemKind::Green, GemKind::Orange];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn sprite(&self) -> Sprite {
        match self {
            GemKind::Blue => Sprite::GemBlue,
            GemKind::Green => Sprite::GemGreen,
            GemKind::Orange => Sprite::GemOrange,
        }
    }

    /// seconds added to the clock when collected
    pub fn time_to_add(&self) -> f64 {
        match self {
            GemKind::Blue => 30.0,
            GemKind::Green => 20.0,
            GemKind::Orange => 10.0,
        }
    }

    /// seconds before it moves somewhere else
    pub fn expires_in(&self) -> f64 {
        match self {
            GemKind::Blue => 15.0,
            GemKind::Green => 10.0,
            GemKind::Orange => 5.0,
        }
    }
}

/// Bonus time pickup, always somewhere on the lanes
#[derive(Debug, Clone)]
pub struct Gem {
    pub(crate) position: Point,
    kind: GemKind,
    expires_in: f64,
}

impl Default for Gem {
    /// Blue gem on the first lane, fresh timer
    fn default() -> Self {
        Gem {
            position: grid_position(0, LANES[0]),
            kind: GemKind::Blue,
            expires_in: GemKind::Blue.expires_in(),
        }
    }
}

impl Gem {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut gem = Gem::default();
        gem.respawn(rng);
        gem
    }

    /// New kind, new spot, fresh timer
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let kind = GemKind::random(rng);
        let lane = LANES[rng.gen_range(0..LANES.len())];
        let col = random_int_inclusive(rng, 0, NUM_COLS as i32 - 1);

        self.kind = kind;
        self.expires_in = kind.expires_in();
        self.position = grid_position(col, lane);
    }

    /// Collected by the player
    pub fn do_collide<R: Rng + ?Sized>(&mut self, scores: &mut dyn ScoreKeeper, rng: &mut R) {
        scores.change_time(self.kind.time_to_add());
        self.respawn(rng);
    }

    pub fn kind(&self) -> GemKind {
        self.kind
    }

    pub fn expires_in(&self) -> f64 {
        self.expires_in
    }
}

impl Entity for Gem {
    fn update(&mut self, frame: &mut Frame<'_>) {
        self.expires_in -= frame.dt;
        if self.expires_in <= 0.0 {
            self.respawn(&mut *frame.rng);
        }
    }

    fn position(&self) -> Point {
        self.position
    }

    fn sprite(&self) -> Sprite {
        self.kind.sprite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::testing::Tally;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn on_the_lanes(gem: &Gem) -> bool {
        let col = gem.position().x / 101.0;
        let row = (gem.position().y + 25.0) / 83.0;
        col.fract() == 0.0
            && (0.0..=4.0).contains(&col)
            && row.fract() == 0.0
            && (1.0..=3.0).contains(&row)
    }

    fn step(gem: &mut Gem, rng: &mut StdRng, dt: f64) {
        let mut tally = Tally::default();
        let mut frame = Frame {
            dt,
            rng,
            scores: &mut tally,
        };
        gem.update(&mut frame);
    }

    #[test]
    fn kinds_carry_their_table() {
        assert_eq!((GemKind::Blue.time_to_add(), GemKind::Blue.expires_in()), (30.0, 15.0));
        assert_eq!((GemKind::Green.time_to_add(), GemKind::Green.expires_in()), (20.0, 10.0));
        assert_eq!((GemKind::Orange.time_to_add(), GemKind::Orange.expires_in()), (10.0, 5.0));
        assert_eq!(GemKind::Orange.sprite(), Sprite::GemOrange);
    }

    #[test]
    fn every_kind_gets_picked() {
        let mut rng = StdRng::seed_from_u64(5);
        let picks: Vec<GemKind> = (0..300).map(|_| GemKind::random(&mut rng)).collect();
        for kind in GemKind::ALL {
            assert!(picks.contains(&kind));
        }
    }

    #[test]
    fn spawns_on_a_lane_with_its_kinds_timer() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let gem = Gem::new(&mut rng);
            assert!(on_the_lanes(&gem));
            assert_eq!(gem.expires_in(), gem.kind().expires_in());
            assert_eq!(gem.sprite(), gem.kind().sprite());
        }
    }

    #[test]
    fn counts_down_before_expiring() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut gem = Gem::new(&mut rng);
        let (kind, position, before) = (gem.kind(), gem.position(), gem.expires_in());

        step(&mut gem, &mut rng, 1.25);

        assert_relative_eq!(gem.expires_in(), before - 1.25);
        assert_eq!(gem.kind(), kind);
        assert_eq!(gem.position(), position);
    }

    #[test]
    fn respawns_when_the_timer_runs_out() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut gem = Gem::new(&mut rng);
        let remaining = gem.expires_in();

        step(&mut gem, &mut rng, remaining);

        assert_eq!(gem.expires_in(), gem.kind().expires_in());
        assert!(on_the_lanes(&gem));
    }

    #[test]
    fn blue_gem_adds_thirty_seconds_and_moves_on() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut gem = Gem::new(&mut rng);
        gem.kind = GemKind::Blue;
        gem.expires_in = 15.0;
        let mut tally = Tally::default();

        gem.do_collide(&mut tally, &mut rng);

        assert_eq!(tally.time, 30.0);
        assert_eq!(tally.score, 0);
        assert_eq!(gem.expires_in(), gem.kind().expires_in());
        assert!(on_the_lanes(&gem));
    }
}
