//! Collision combat between opposing units
//!
//! Both sides roll a d6 and lose that many hit points. Both rolls are
//! drawn before either is applied, so a kill on one side never cancels
//! damage to the other.

use crate::resolve::dice::Dice;
use crate::resolve::events::TurnEvent;
use crate::world::unit::Unit;

/// Outcome of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatResult {
    pub attacker_roll: u32,
    pub defender_roll: u32,
    pub attacker_loss: u32,
    pub defender_loss: u32,
    pub attacker_killed: bool,
    pub defender_killed: bool,
}

impl CombatResult {
    pub fn mutual_kill(&self) -> bool {
        self.attacker_killed && self.defender_killed
    }
}

/// Resolve combat between `units[attacker]` and `units[defender]`
///
/// # Panics
/// If the two indices are equal or out of range.
pub fn resolve_combat(
    units: &mut [Unit],
    attacker: usize,
    defender: usize,
    dice: &mut dyn Dice,
    events: &mut Vec<TurnEvent>,
) -> CombatResult {
    let attacker_roll = dice.roll_d6();
    let defender_roll = dice.roll_d6();

    let (a, d) = pair_mut(units, attacker, defender);
    let attacker_loss = a.take_damage(attacker_roll);
    let defender_loss = d.take_damage(defender_roll);

    tracing::debug!(
        "Combat {} vs {}: rolls {}/{}, hp now {}/{}",
        a.id,
        d.id,
        attacker_roll,
        defender_roll,
        a.hp,
        d.hp
    );

    for (unit, loss) in [(&*a, attacker_loss), (&*d, defender_loss)] {
        if loss > 0 {
            events.push(TurnEvent::Damaged {
                unit: unit.id.clone(),
                at: unit.position,
                loss,
            });
        }
    }
    for (unit, loss) in [(&*a, attacker_loss), (&*d, defender_loss)] {
        if loss > 0 && !unit.is_alive() {
            events.push(TurnEvent::Killed {
                unit: unit.id.clone(),
                at: unit.position,
            });
        }
    }

    CombatResult {
        attacker_roll,
        defender_roll,
        attacker_loss,
        defender_loss,
        attacker_killed: !a.is_alive(),
        defender_killed: !d.is_alive(),
    }
}

fn pair_mut(units: &mut [Unit], a: usize, b: usize) -> (&mut Unit, &mut Unit) {
    assert_ne!(a, b, "a unit cannot fight itself");
    if a < b {
        let (left, right) = units.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = units.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
