// Banker line/card colors
pub const BANKER_COLORS: [&str; 8] = [
    "#D4AF37", // gold
    "#22c55e", // green
    "#3b82f6", // blue
    "#f97316", // orange
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f59e0b", // amber
    "#8b5cf6", // purple
];

/// Color of `name` by its position in `order`, wrapping after eight.
pub fn banker_color(name: &str, order: &[String]) -> Option<&'static str> {
    order
        .iter()
        .position(|n| n == name)
        .map(|index| BANKER_COLORS[index % BANKER_COLORS.len()])
}
