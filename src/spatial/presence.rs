//! Presence at home

use crate::types::{Position, User};

/// Share of interactions that happened at the user's home.
///
/// `None` when no home was inferred or the home has neither antenna nor
/// coordinates. An empty window with a valid home yields `0.0`.
pub fn percent_at_home(positions: &[Position], user: &User) -> Option<f64> {
    let home = user.home.as_ref().filter(|home| home.is_known())?;

    if positions.is_empty() {
        return Some(0.0);
    }

    let at_home = positions.iter().filter(|p| *p == home).count();
    Some(at_home as f64 / positions.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_home(home: Option<Position>) -> User {
        User {
            home,
            ..User::default()
        }
    }

    #[test]
    fn test_share_at_home() {
        let home = Position::from_antenna("home");
        let user = user_with_home(Some(home.clone()));
        let positions = vec![
            home.clone(),
            Position::from_antenna("work"),
            home,
            Position::from_antenna("gym"),
        ];

        assert_eq!(percent_at_home(&positions, &user), Some(0.5));
    }

    #[test]
    fn test_empty_window_with_home_is_zero() {
        let user = user_with_home(Some(Position::from_location(46.5, 6.6)));
        assert_eq!(percent_at_home(&[], &user), Some(0.0));
    }

    #[test]
    fn test_no_home_is_undefined() {
        let positions = vec![Position::from_antenna("a")];
        assert_eq!(percent_at_home(&positions, &user_with_home(None)), None);

        // A home without antenna or coordinates is as good as no home
        let user = user_with_home(Some(Position::default()));
        assert_eq!(percent_at_home(&positions, &user), None);
    }

    #[test]
    fn test_home_equality_is_structural() {
        // Same antenna but extra coordinates is a different position
        let user = user_with_home(Some(Position::from_antenna("t1")));
        let positions = vec![Position {
            antenna: Some("t1".to_string()),
            location: Some(crate::types::Location::new(1.0, 2.0)),
        }];
        assert_eq!(percent_at_home(&positions, &user), Some(0.0));
    }
}
