//! Placement precedence per role.

use crate::element::ElementRole;

/// Placement precedence of a role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Priority {
    /// Lower values take precedence.
    pub rank: u8,
    /// Whether other elements may sit on top of this one.
    pub can_overlap: bool,
    /// Score lost by a lower-precedence candidate overlapping this role.
    pub penalty: f64,
}

const fn priority(rank: u8, can_overlap: bool, penalty: f64) -> Priority {
    Priority {
        rank,
        can_overlap,
        penalty,
    }
}

/// Looks up the priority of a role.
///
/// Background elements never take part in placement and get the lowest
/// precedence with no penalty.
#[must_use]
pub fn priority_of(role: ElementRole) -> Priority {
    match role {
        ElementRole::ValueTile => priority(1, false, f64::INFINITY),
        ElementRole::Logo | ElementRole::Cta => priority(2, false, 50.0),
        ElementRole::Packshot => priority(3, false, 40.0),
        ElementRole::Headline => priority(4, false, 30.0),
        ElementRole::BrandTag | ElementRole::Drinkaware => priority(5, false, 25.0),
        ElementRole::Text | ElementRole::Subheading => priority(6, true, 20.0),
        ElementRole::Badge => priority(7, true, 15.0),
        ElementRole::Sticker => priority(8, true, 10.0),
        ElementRole::Image | ElementRole::Shape => priority(9, true, 5.0),
        ElementRole::Decorative => priority(10, true, 1.0),
        ElementRole::Background => priority(u8::MAX, true, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_tile_outranks_everything() {
        let tile = priority_of(ElementRole::ValueTile);
        assert!(tile.penalty.is_infinite());
        assert!(!tile.can_overlap);
        for role in ElementRole::ALL {
            if role != ElementRole::ValueTile {
                assert!(priority_of(role).rank > tile.rank, "{role}");
            }
        }
    }

    #[test]
    fn decorative_is_lowest_placed_role() {
        let deco = priority_of(ElementRole::Decorative);
        assert_eq!(deco.rank, 10);
        assert!((deco.penalty - 1.0).abs() < f64::EPSILON);
    }
}
