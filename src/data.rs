//! Static product tables: rooms, wall backgrounds, layouts and frame styles.

use crate::types::{Anchor, Background, BackgroundSection, Frame, FrameStyle, Layout, Percent, Place};

fn place(id: &str, name: &str, color: &str) -> Place {
    Place {
        id: id.into(),
        name: name.into(),
        color: color.into(),
        image: None,
    }
}

/// Rooms offered in step 1.
pub fn places() -> Vec<Place> {
    vec![
        place("living-room", "Living room", "#d9cbb8"),
        place("bedroom", "Bedroom", "#c9d3d8"),
        place("kitchen", "Kitchen", "#e6e0cf"),
        place("office", "Office", "#cfd2c4"),
    ]
}

fn background(section: &str, id: &str, name: &str, color: &str) -> Background {
    Background {
        id: id.into(),
        name: name.into(),
        color: color.into(),
        image: None,
        section: Some(section.into()),
    }
}

/// Wall backgrounds offered in step 1, grouped by section.
pub fn background_sections() -> Vec<BackgroundSection> {
    vec![
        BackgroundSection {
            name: "Paint".into(),
            variants: vec![
                background("Paint", "paint-white", "Chalk white", "#f4f1ea"),
                background("Paint", "paint-sage", "Sage", "#b7c1a8"),
                background("Paint", "paint-clay", "Clay", "#c98f6f"),
                background("Paint", "paint-navy", "Deep navy", "#2f3b52"),
            ],
        },
        BackgroundSection {
            name: "Materials".into(),
            variants: vec![
                background("Materials", "concrete", "Concrete", "#a7a6a1"),
                background("Materials", "oak-panel", "Oak panel", "#b48a5a"),
                background("Materials", "brick", "Whitewashed brick", "#e3ddd3"),
            ],
        },
    ]
}

fn slot(width: f32, height: f32, size: &str, anchor: Anchor) -> Frame {
    Frame {
        width: Percent(width),
        height: Percent(height),
        size: size.into(),
        anchor,
        transform: None,
    }
}

fn top_left(top: f32, left: f32) -> Anchor {
    Anchor::TopLeft {
        top: Percent(top),
        left: Percent(left),
    }
}

fn top_right(top: f32, right: f32) -> Anchor {
    Anchor::TopRight {
        top: Percent(top),
        right: Percent(right),
    }
}

fn bottom_left(bottom: f32, left: f32) -> Anchor {
    Anchor::BottomLeft {
        bottom: Percent(bottom),
        left: Percent(left),
    }
}

fn bottom_right(bottom: f32, right: f32) -> Anchor {
    Anchor::BottomRight {
        bottom: Percent(bottom),
        right: Percent(right),
    }
}

fn center(x: f32, y: f32) -> Anchor {
    Anchor::Center {
        x: Percent(x),
        y: Percent(y),
    }
}

fn layout(id: &str, name: &str, frames: Vec<Frame>) -> Layout {
    Layout {
        id: id.into(),
        name: name.into(),
        frame_count: frames.len(),
        frames,
    }
}

/// Layouts offered in step 2.
pub fn layouts() -> Vec<Layout> {
    vec![
        layout("single", "Single statement", vec![slot(24.0, 48.0, "50x70", center(50.0, 45.0))]),
        layout(
            "duo",
            "Duo",
            vec![
                slot(18.0, 36.0, "40x50", top_left(20.0, 30.0)),
                slot(18.0, 36.0, "40x50", top_right(20.0, 30.0)),
            ],
        ),
        layout(
            "trio",
            "Trio",
            vec![
                slot(14.0, 28.0, "30x40", top_left(25.0, 22.0)),
                slot(20.0, 40.0, "50x70", center(50.0, 45.0)),
                slot(14.0, 28.0, "30x40", top_right(25.0, 22.0)),
            ],
        ),
        layout(
            "grid-four",
            "Grid of four",
            vec![
                slot(15.0, 26.0, "30x40", top_left(12.0, 33.0)),
                slot(15.0, 26.0, "30x40", top_right(12.0, 33.0)),
                slot(15.0, 26.0, "30x40", bottom_left(18.0, 33.0)),
                slot(15.0, 26.0, "30x40", bottom_right(18.0, 33.0)),
            ],
        ),
        layout(
            "salon-six",
            "Salon wall",
            vec![
                slot(20.0, 40.0, "50x70", top_left(10.0, 20.0)),
                slot(12.0, 22.0, "30x40", top_left(10.0, 43.0)),
                slot(12.0, 22.0, "30x40", bottom_left(28.0, 43.0)),
                slot(16.0, 16.0, "50x50", top_right(10.0, 22.0)),
                slot(16.0, 26.0, "40x50", bottom_right(14.0, 22.0)),
                slot(10.0, 18.0, "21x30", bottom_left(14.0, 58.0)),
            ],
        ),
    ]
}

/// Frame styles offered in step 3.
pub fn frame_styles() -> Vec<FrameStyle> {
    let style = |id: &str, name: &str, color: &str, price: &str| FrameStyle {
        id: id.into(),
        name: name.into(),
        color: color.into(),
        price: Some(price.into()),
    };
    vec![
        style("black-aluminium", "Black aluminium", "#1d1d1d", "19.00"),
        style("white-wood", "White wood", "#f2f2ef", "24.00"),
        style("natural-oak", "Natural oak", "#c49a6c", "29.00"),
        style("brass", "Brass", "#b5985a", "34.00"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_frame_counts_match_frames() {
        for layout in layouts() {
            assert_eq!(layout.frame_count, layout.frames.len(), "{}", layout.id);
        }
    }

    #[test]
    fn layout_frames_fit_inside_the_wall() {
        for layout in layouts() {
            for frame in &layout.frames {
                let rect = frame.rect(1000.0, 600.0);
                assert!(rect.x >= 0.0 && rect.y >= 0.0, "{} {:?}", layout.id, rect);
                assert!(rect.x + rect.width <= 1000.0 && rect.y + rect.height <= 600.0, "{}", layout.id);
            }
        }
    }

    #[test]
    fn background_variants_name_their_section() {
        for section in background_sections() {
            assert!(section.variants.iter().all(|b| b.section.as_deref() == Some(section.name.as_str())));
        }
    }
}
