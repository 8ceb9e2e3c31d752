use ratatui::style::Color;

/// Create a gradient color between two RGB values.
///
/// # Arguments
/// * `start` - Starting RGB color
/// * `end` - Ending RGB color
/// * `position` - Position in gradient, clamped to 0.0..=1.0
pub fn gradient_color(start: (u8, u8, u8), end: (u8, u8, u8), position: f32) -> Color {
    let position = position.clamp(0.0, 1.0);
    let r = (start.0 as f32 + (end.0 as f32 - start.0 as f32) * position) as u8;
    let g = (start.1 as f32 + (end.1 as f32 - start.1 as f32) * position) as u8;
    let b = (start.2 as f32 + (end.2 as f32 - start.2 as f32) * position) as u8;
    Color::Rgb(r, g, b)
}

/// Gradient position of a page within the carousel.
pub fn page_position(index: usize, page_count: usize) -> f32 {
    if page_count <= 1 {
        return 0.0;
    }
    index as f32 / (page_count - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient_color((0, 0, 0), (200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient_color((0, 0, 0), (200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(gradient_color((0, 0, 0), (200, 100, 50), 7.0), Color::Rgb(200, 100, 50));
    }

    #[test]
    fn test_page_position() {
        assert_eq!(page_position(0, 1), 0.0);
        assert_eq!(page_position(2, 5), 0.5);
        assert_eq!(page_position(4, 5), 1.0);
    }
}
