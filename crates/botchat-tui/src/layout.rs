//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Rows taken by the composer (border + input line + border)
pub const COMPOSER_HEIGHT: u16 = 3;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Header (title + bot name + user)
    pub header: Rect,

    /// View-specific content
    pub body: Rect,

    /// One-line key hint bar
    pub status: Rect,
}

/// Split of the body in the chat view
#[derive(Debug, Clone, Copy)]
pub struct ChatAreas {
    pub transcript: Rect,
    pub composer: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        Constraint::Min(3),    // Body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Split the body into transcript and composer
pub fn split_chat(body: Rect) -> ChatAreas {
    let chunks =
        Layout::vertical([Constraint::Min(1), Constraint::Length(COMPOSER_HEIGHT)]).split(body);

    ChatAreas {
        transcript: chunks[0],
        composer: chunks[1],
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout_standard_terminal() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.body.y, 3);
        assert_eq!(layout.body.height, 20); // 24 - 3 - 1
        assert_eq!(layout.status.y, 23);
        assert_eq!(layout.status.height, 1);
    }

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 60, 15);
        let layout = create(area);
        assert_eq!(
            layout.header.height + layout.body.height + layout.status.height,
            area.height
        );
    }

    #[test]
    fn test_split_chat_reserves_composer() {
        let body = Rect::new(0, 3, 80, 20);
        let chat = split_chat(body);

        assert_eq!(chat.composer.height, COMPOSER_HEIGHT);
        assert_eq!(chat.transcript.height, 17);
        assert_eq!(chat.composer.y, chat.transcript.y + chat.transcript.height);
    }

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 20);
        let rect = centered(area, 40, 10);
        assert_eq!((rect.width, rect.height), (40, 10));
        assert_eq!((rect.x, rect.y), (20, 5));

        let small = centered(Rect::new(0, 0, 30, 6), 40, 10);
        assert_eq!((small.width, small.height), (30, 6));
    }
}
