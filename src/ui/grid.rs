use ratatui::layout::Rect;

/// Card slots for one row section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardGrid {
    /// One slot per drawn card, in index order.
    pub slots: Vec<Rect>,
    /// Cards left out because the area is too small.
    pub hidden: usize,
    /// Slot taken by the "+N more" marker when `hidden > 0`.
    pub overflow: Option<Rect>,
}

/// Lays `count` cards out left to right, wrapping onto new rows.
///
/// Card width shrinks from `max_width` down to `min_width` so a full row of
/// cards fits before wrapping. When the area still cannot hold every card, the
/// last slot is handed to an overflow marker instead of dropping cards silently.
pub fn card_grid(
    area: Rect,
    count: usize,
    min_width: u16,
    max_width: u16,
    card_height: u16,
) -> CardGrid {
    if count == 0 || min_width == 0 || card_height == 0 {
        return CardGrid::default();
    }

    let max_width = max_width.max(min_width);
    let even_share = (area.width as usize / count).min(u16::MAX as usize) as u16;
    let card_width = even_share.clamp(min_width, max_width);

    let columns = (area.width / card_width) as usize;
    let rows = (area.height / card_height) as usize;
    let capacity = columns * rows;

    let slot = |i: usize| {
        let column = (i % columns) as u16;
        let row = (i / columns) as u16;
        Rect::new(
            area.x + column * card_width,
            area.y + row * card_height,
            card_width,
            card_height,
        )
    };

    if count <= capacity {
        return CardGrid {
            slots: (0..count).map(slot).collect(),
            hidden: 0,
            overflow: None,
        };
    }

    if capacity == 0 {
        // Not even one card fits; the marker gets whatever line there is.
        let overflow = (area.width > 0 && area.height > 0)
            .then(|| Rect::new(area.x, area.y, area.width, 1));
        return CardGrid { slots: Vec::new(), hidden: count, overflow };
    }

    let visible = capacity - 1;
    CardGrid {
        slots: (0..visible).map(slot).collect(),
        hidden: count - visible,
        overflow: Some(slot(visible)),
    }
}
