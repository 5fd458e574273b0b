//! Geometric Layout
//!
//! Pure placement functions. Offense is anchored first; the defensive shell
//! is then derived from the computed offensive positions plus the coverage
//! label. Defense is never placed independently of the offense — corners key
//! on the receivers, linebackers key on the tight end, and only the safety
//! shell depth comes from the coverage number.

use crate::play::model::Point;

/// Offensive anchor row (the line of scrimmage band on the canvas).
const BASE_Y: f64 = 360.0;

/// Computed offensive positions for one formation.
///
/// `rb` is absent for empty-backfield variants.
#[derive(Clone, Debug, PartialEq)]
pub struct OffensiveLayout {
    /// Quarterback.
    pub qb: Point,
    /// Running back, if the backfield is not empty.
    pub rb: Option<Point>,
    /// Outside receiver.
    pub wr1: Point,
    /// Slot receiver.
    pub wr2: Point,
    /// Wide receiver.
    pub wr3: Point,
    /// Tight end.
    pub te: Point,
}

impl OffensiveLayout {
    /// Positions in entity order: qb, rb (when present), receivers, te.
    pub fn positions(&self) -> Vec<(&'static str, Point)> {
        let mut out = vec![("qb", self.qb)];
        if let Some(rb) = self.rb {
            out.push(("rb", rb));
        }
        out.extend([
            ("wr1", self.wr1),
            ("wr2", self.wr2),
            ("wr3", self.wr3),
            ("te", self.te),
        ]);
        out
    }
}

/// Place the offense for a formation string ("gun trips") and spacing tag.
pub fn formation_layout(formation: &str, tag: &str) -> OffensiveLayout {
    let (qb_y, rb_y) = if formation.contains("gun") {
        (420.0, 470.0)
    } else {
        (440.0, 480.0)
    };

    let mut layout = OffensiveLayout {
        qb: Point::new(50.0, qb_y),
        rb: Some(Point::new(40.0, rb_y)),
        wr1: Point::new(60.0, BASE_Y - 120.0),
        wr2: Point::new(60.0, BASE_Y - 200.0),
        wr3: Point::new(60.0, BASE_Y - 280.0),
        te: Point::new(60.0, BASE_Y - 40.0),
    };

    if formation.contains("trips") {
        layout.wr1 = Point::new(60.0, BASE_Y - 140.0);
        layout.wr2 = Point::new(60.0, BASE_Y - 210.0);
        layout.wr3 = Point::new(60.0, BASE_Y - 280.0);
    }
    if formation.contains("empty") {
        layout.rb = None;
    }

    match tag {
        "bunch" => {
            layout.wr1 = Point::new(80.0, BASE_Y - 200.0);
            layout.wr2 = Point::new(90.0, BASE_Y - 220.0);
            layout.wr3 = Point::new(100.0, BASE_Y - 180.0);
        }
        "nasty" => {
            layout.wr1 = Point::new(60.0, BASE_Y - 180.0);
            layout.wr2 = Point::new(60.0, BASE_Y - 240.0);
            layout.wr3 = Point::new(60.0, BASE_Y - 300.0);
        }
        _ => {}
    }

    layout
}

/// Safety shell depth for a coverage number. Lower y is deeper.
fn shell_depth(coverage_number: &str) -> f64 {
    match coverage_number {
        "0" | "1" => 260.0,
        "2" | "3" => 220.0,
        "4" | "6" | "9" => 180.0,
        _ => 200.0,
    }
}

/// Derive the defensive shell from the offensive layout and coverage.
///
/// Returned in entity order: corners, linebackers, safeties, front four.
pub fn defense_shell(offense: &OffensiveLayout, coverage: &str) -> Vec<(&'static str, Point)> {
    let coverage_number = coverage.split_whitespace().next().unwrap_or("");
    let shell_y = shell_depth(coverage_number);

    // Corners align opposite the computed receiver positions with outside
    // leverage; linebackers stack off the tight end.
    let mut cb1 = Point::new(220.0, offense.wr3.y + 60.0);
    let mut cb2 = Point::new(220.0, offense.wr1.y + 20.0);
    let mut lb1 = Point::new(200.0, offense.te.y - 60.0);
    let mut lb2 = Point::new(200.0, offense.te.y - 20.0);
    let lb3 = Point::new(200.0, offense.te.y - 120.0);

    if coverage.contains("press") {
        cb1 = Point::new(140.0, offense.wr3.y + 90.0);
        cb2 = Point::new(140.0, offense.wr1.y + 90.0);
    }
    if coverage.contains("blitz") {
        lb1 = Point::new(170.0, offense.te.y - 100.0);
        lb2 = Point::new(170.0, offense.te.y - 40.0);
    }

    vec![
        ("cb1", cb1),
        ("cb2", cb2),
        ("lb1", lb1),
        ("lb2", lb2),
        ("lb3", lb3),
        ("ss", Point::new(260.0, shell_y)),
        ("fs", Point::new(260.0, shell_y + 60.0)),
        ("de1", Point::new(140.0, 120.0)),
        ("dt1", Point::new(140.0, 170.0)),
        ("dt2", Point::new(140.0, 220.0)),
        ("de2", Point::new(140.0, 270.0)),
    ]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn position<'a>(shell: &'a [(&'static str, Point)], role: &str) -> &'a Point {
        &shell.iter().find(|(name, _)| *name == role).unwrap().1
    }

    #[test]
    fn test_base_layout() {
        let layout = formation_layout("pro split", "x");
        assert_eq!(layout.qb, Point::new(50.0, 440.0));
        assert_eq!(layout.rb, Some(Point::new(40.0, 480.0)));
        assert_eq!(layout.wr1, Point::new(60.0, 240.0));
        assert_eq!(layout.wr3, Point::new(60.0, 80.0));
        assert_eq!(layout.te, Point::new(60.0, 320.0));
    }

    #[test]
    fn test_gun_backfield_depth() {
        let layout = formation_layout("gun doubles", "x");
        assert_eq!(layout.qb.y, 420.0);
        assert_eq!(layout.rb.unwrap().y, 470.0);
    }

    #[test]
    fn test_trips_compresses_stack() {
        let layout = formation_layout("singleback trips", "x");
        assert_eq!(layout.wr1.y, 220.0);
        assert_eq!(layout.wr2.y, 150.0);
        assert_eq!(layout.wr3.y, 80.0);
    }

    #[test]
    fn test_bunch_clusters_receivers() {
        let layout = formation_layout("gun trips", "bunch");
        assert_eq!(layout.wr1, Point::new(80.0, 160.0));
        assert_eq!(layout.wr2, Point::new(90.0, 140.0));
        assert_eq!(layout.wr3, Point::new(100.0, 180.0));
    }

    #[test]
    fn test_empty_backfield_has_no_rb() {
        let layout = formation_layout("gun empty", "x");
        assert_eq!(layout.rb, None);
        assert!(!layout.positions().iter().any(|(name, _)| *name == "rb"));
    }

    #[test]
    fn test_shell_depth_by_coverage_number() {
        let offense = formation_layout("pro split", "x");
        assert_eq!(position(&defense_shell(&offense, "1 hole"), "ss").y, 260.0);
        assert_eq!(position(&defense_shell(&offense, "3 buzz"), "ss").y, 220.0);
        assert_eq!(position(&defense_shell(&offense, "4 quarters"), "ss").y, 180.0);
        // Free safety sits 60 behind the strong safety.
        assert_eq!(position(&defense_shell(&offense, "3 buzz"), "fs").y, 280.0);
    }

    #[test]
    fn test_press_tightens_corners() {
        let offense = formation_layout("pro split", "x");
        let shell = defense_shell(&offense, "2 press");
        assert_eq!(*position(&shell, "cb1"), Point::new(140.0, 170.0));
        assert_eq!(*position(&shell, "cb2"), Point::new(140.0, 330.0));
    }

    #[test]
    fn test_blitz_walks_linebackers_up() {
        let offense = formation_layout("pro split", "x");
        let shell = defense_shell(&offense, "0 lb blitz");
        assert_eq!(*position(&shell, "lb1"), Point::new(170.0, 220.0));
        assert_eq!(*position(&shell, "lb2"), Point::new(170.0, 280.0));
    }

    #[test]
    fn test_defense_follows_receivers() {
        // Same coverage, different offensive alignment: corners must move.
        let spread = formation_layout("pro split", "x");
        let bunch = formation_layout("pro split", "bunch");
        let spread_shell = defense_shell(&spread, "3 buzz");
        let bunch_shell = defense_shell(&bunch, "3 buzz");
        assert_ne!(position(&spread_shell, "cb1"), position(&bunch_shell, "cb1"));
        assert_ne!(position(&spread_shell, "cb2"), position(&bunch_shell, "cb2"));
    }

    #[test]
    fn test_front_four_anchor_the_line() {
        let offense = formation_layout("i pro", "x");
        let shell = defense_shell(&offense, "6 show");
        for role in ["de1", "dt1", "dt2", "de2"] {
            assert_eq!(position(&shell, role).x, 140.0);
        }
    }
}
