//! Cast preconditions shared by the engine and the intent preview.

use crate::ability::Ability;
use crate::grid::{Grid, Position};

use super::errors::CombatError;
use super::log::LogSink;
use super::los::has_line_of_sight;

/// Checks bounds, AP, range, adjacency (true melee) and line of sight (ranged).
pub(crate) fn validate_cast(
    ability: &Ability,
    source: Position,
    target: Position,
    available_ap: i32,
    grid: &Grid,
) -> Result<(), CombatError> {
    if !grid.in_bounds(target) {
        return Err(CombatError::TargetOutOfBounds { target });
    }

    if available_ap < ability.cost_ap {
        return Err(CombatError::InsufficientAp {
            ability: ability.id.clone(),
            need: ability.cost_ap,
            have: available_ap,
        });
    }

    if !ability.in_range(source, target) {
        return Err(CombatError::OutOfRange {
            ability: ability.id.clone(),
            min: ability.range_min,
            max: ability.range_max,
            distance: source.manhattan_distance(target),
        });
    }

    if ability.requires_adjacency() && !source.is_adjacent(target) {
        return Err(CombatError::NotAdjacent {
            ability: ability.id.clone(),
        });
    }

    if ability.is_ranged() && !has_line_of_sight(grid, source, target) {
        return Err(CombatError::NoLineOfSight);
    }

    Ok(())
}

/// Dry-run of a cast: logs the verdict and returns whether it would go through.
///
/// Never mutates anything besides the log.
pub fn preview_cast(
    ability: &Ability,
    source: Position,
    target: Position,
    available_ap: i32,
    grid: &Grid,
    log: &mut dyn LogSink,
) -> bool {
    match validate_cast(ability, source, target, available_ap, grid) {
        Ok(()) => {
            log.append(format!(
                "would cast {} from {} to {} costing {} AP",
                ability.id, source, target, ability.cost_ap
            ));
            true
        }
        Err(error) => {
            log.append(error.to_string());
            false
        }
    }
}
