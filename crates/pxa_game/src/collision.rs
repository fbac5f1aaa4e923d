//! Axis-separated move-then-resolve against static platforms.
//!
//! A mover is displaced along one axis, then pushed back out of every solid
//! it now overlaps, along that axis only. Running the X pass and then the Y
//! pass yields the usual platformer wall-slide and floor-landing behavior.
//!
//! This is a discrete policy, not a swept solver: it is exact only while one
//! step's displacement is smaller than the thinnest platform. Faster movers
//! can tunnel.

use crate::entity::Body;

/// Which sides were blocked during the last resolution. Screen-space: `down`
/// means landing on top of a solid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub up: bool,
}

impl Contacts {
    pub fn merge(self, other: Contacts) -> Contacts {
        Contacts {
            left: self.left || other.left,
            right: self.right || other.right,
            down: self.down || other.down,
            up: self.up || other.up,
        }
    }
}

/// Move by `vx` and push out horizontally. A zero `vx` leaves overlaps alone.
pub fn move_x(body: &mut Body, vx: f32, solids: &[Body]) -> Contacts {
    body.pos.x += vx;

    let mut contacts = Contacts::default();
    for solid in solids {
        if !body.overlaps(solid) {
            continue;
        }
        let rect = solid.rect();
        if vx > 0.0 {
            body.set_right(rect.left);
            contacts.right = true;
        } else if vx < 0.0 {
            body.set_left(rect.right());
            contacts.left = true;
        }
    }
    contacts
}

/// Move by `*vy` and push out vertically. The first contact zeroes `*vy`, so
/// later overlaps in the same pass are left alone.
pub fn move_y(body: &mut Body, vy: &mut f32, solids: &[Body]) -> Contacts {
    body.pos.y += *vy;

    let mut contacts = Contacts::default();
    for solid in solids {
        if !body.overlaps(solid) {
            continue;
        }
        let rect = solid.rect();
        if *vy > 0.0 {
            body.set_bottom(rect.top);
            *vy = 0.0;
            contacts.down = true;
        } else if *vy < 0.0 {
            body.set_top(rect.bottom());
            *vy = 0.0;
            contacts.up = true;
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PlaceholderCatalog;

    fn block(x: f32, y: f32) -> Body {
        Body::new(x, y, "block", &PlaceholderCatalog)
    }

    fn hero(x: f32, y: f32) -> Body {
        Body::new(x, y, "hero_idle_1", &PlaceholderCatalog)
    }

    #[test]
    fn moving_right_into_wall_stops_flush() {
        // Wall spans x 375..425.
        let solids = [block(400.0, 300.0)];
        let mut body = hero(356.0, 300.0);
        let contacts = move_x(&mut body, 4.0, &solids);
        assert!(contacts.right);
        assert_eq!(body.rect().right(), 375.0);
        assert!(!body.overlaps(&solids[0]));
    }

    #[test]
    fn moving_left_into_wall_stops_flush() {
        let solids = [block(400.0, 300.0)];
        let mut body = hero(444.0, 300.0);
        let contacts = move_x(&mut body, -4.0, &solids);
        assert!(contacts.left);
        assert_eq!(body.rect().left, 425.0);
        assert!(!body.overlaps(&solids[0]));
    }

    #[test]
    fn zero_horizontal_velocity_does_not_correct() {
        let solids = [block(400.0, 300.0)];
        let mut body = hero(390.0, 300.0);
        let contacts = move_x(&mut body, 0.0, &solids);
        assert_eq!(contacts, Contacts::default());
        assert_eq!(body.pos.x, 390.0);
    }

    #[test]
    fn landing_snaps_to_top_and_zeroes_velocity() {
        let solids = [block(100.0, 580.0)];
        let mut body = hero(100.0, 536.0);
        let mut vy = 5.0;
        let contacts = move_y(&mut body, &mut vy, &solids);
        assert!(contacts.down);
        assert_eq!(vy, 0.0);
        assert_eq!(body.rect().bottom(), 555.0);
    }

    #[test]
    fn head_bump_snaps_to_bottom() {
        // Block spans y 225..275.
        let solids = [block(100.0, 250.0)];
        let mut body = hero(100.0, 295.0);
        let mut vy = -8.0;
        let contacts = move_y(&mut body, &mut vy, &solids);
        assert!(contacts.up);
        assert_eq!(vy, 0.0);
        assert_eq!(body.rect().top, 275.0);
    }

    #[test]
    fn first_vertical_contact_wins() {
        let solids = [block(100.0, 580.0), block(100.0, 560.0)];
        let mut body = hero(100.0, 536.0);
        let mut vy = 10.0;
        move_y(&mut body, &mut vy, &solids);
        // Snapped to the first block's top; the second is ignored once vy is 0.
        assert_eq!(body.rect().bottom(), 555.0);
    }

    #[test]
    fn no_overlap_moves_freely() {
        let solids = [block(700.0, 580.0)];
        let mut body = hero(100.0, 300.0);
        let mut vy = 3.5;
        let contacts = move_x(&mut body, 4.0, &solids).merge(move_y(&mut body, &mut vy, &solids));
        assert_eq!(contacts, Contacts::default());
        assert_eq!(body.pos.x, 104.0);
        assert_eq!(body.pos.y, 303.5);
        assert_eq!(vy, 3.5);
    }
}
