//! The demo line: one siding at each end, two platforms in between.
//!
//! ```text
//!   0 ─siding─ 40 ─iron─ 240 ─platform─ 280 ─diamond─ 880 ─platform─ 920 ─iron─ 1120 ─siding─ 1160
//!   west                    central                       harbour                          east
//! ```

use std::io::Cursor;

use sd_core::{AnchorId, RailPos};
use sd_rail::{Anchor, RailNetwork, RailResult, load_network_reader};

const NETWORK_CSV: &str = "\
x1,y1,z1,x2,y2,z2,length,rail_type,one_way\n\
0,64,0,40,64,0,40,siding,\n\
40,64,0,240,64,0,200,iron,\n\
240,64,0,280,64,0,40,platform,\n\
280,64,0,880,64,0,600,diamond,\n\
880,64,0,920,64,0,40,platform,\n\
920,64,0,1120,64,0,200,iron,\n\
1120,64,0,1160,64,0,40,siding,\n\
";

fn at(x: i32) -> RailPos {
    RailPos::new(x, 64, 0)
}

pub struct Stations {
    pub west:     Anchor,
    pub east:     Anchor,
    pub central:  Anchor,
    pub harbour:  Anchor,
}

/// Parse the embedded network and name its anchors.
pub fn build_network() -> RailResult<(RailNetwork, Stations)> {
    let network = load_network_reader(Cursor::new(NETWORK_CSV))?;
    let stations = Stations {
        west:    Anchor::new(AnchorId(1), at(0), at(40)),
        east:    Anchor::new(AnchorId(2), at(1120), at(1160)),
        central: Anchor::new(AnchorId(100), at(240), at(280)).with_dwell(4.0),
        harbour: Anchor::new(AnchorId(101), at(880), at(920)).with_dwell(6.0),
    };
    Ok((network, stations))
}
