use ratatui::Frame;
use ratatui::layout::Layout;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AttachPicker, TitleBar, TranscriptView};
use crate::tui::theme::Theme;

/// Draw one frame: title bar, transcript, input box, and (when open) the
/// attach picker overlay on top.
///
/// The input row's height is asked of the input box itself, so the box
/// grows and shrinks with its wrapped line count; the transcript area
/// takes whatever remains.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use ratatui::layout::Constraint::{Length, Min};

    let theme = Theme::for_mode(app.theme);

    // Paint the whole frame with the mode's background first
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, transcript_area, input_area] = layout.areas(frame.area());

    // Transcript first: it refreshes the unseen-content flag the title reads
    TranscriptView::new(
        &mut tui.transcript_view,
        &app.transcript,
        &theme,
        app.awaiting_reply,
        spinner_frame,
    )
    .render(frame, transcript_area);

    TitleBar::new(
        app.model_name.clone(),
        app.status_message.clone(),
        app.theme.label(),
        tui.transcript_view.has_unseen_content,
    )
    .render_themed(frame, title_area, &theme);

    tui.input_box.render_themed(frame, input_area, &theme);

    if let Some(ref mut picker) = tui.attach_picker {
        AttachPicker::new(picker, &theme).render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use crate::tui::component::EventHandler;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_draw_ui_empty_transcript() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = test_app();
        let mut tui = TuiState::new();
        terminal
            .draw(|f| {
                draw_ui(f, &app, &mut tui, 0);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Kaiwa"));
        assert!(text.contains("Message"));
    }

    #[test]
    fn test_draw_ui_renders_exchange() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        app.transcript.push_user("Hello");
        app.transcript.push_assistant("Hi there");

        let mut tui = TuiState::new();
        terminal
            .draw(|f| {
                draw_ui(f, &app, &mut tui, 0);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Hello"));
        assert!(text.contains("Hi there"));
    }

    #[test]
    fn test_input_area_grows_with_content() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = test_app();
        let mut tui = TuiState::new();

        use crate::tui::event::TuiEvent;
        for c in "one\ntwo\nthree".chars() {
            tui.input_box.handle_event(&TuiEvent::InputChar(c));
        }

        terminal
            .draw(|f| {
                draw_ui(f, &app, &mut tui, 0);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("three"));
    }
}
