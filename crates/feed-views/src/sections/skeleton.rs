//! Loading placeholders.

/// Number of placeholder cards shown while loading.
pub const SKELETON_CARDS: usize = 5;

const BAR: &str = "░";

fn bar(width: usize) -> String {
    BAR.repeat(width)
}

/// One placeholder card.
pub fn render_card_skeleton() -> String {
    [bar(36), bar(20), bar(48)].join("\n")
}

/// The full list of placeholder cards.
pub fn render_skeleton() -> String {
    (0..SKELETON_CARDS)
        .map(|_| render_card_skeleton())
        .collect::<Vec<_>>()
        .join("\n\n")
}
