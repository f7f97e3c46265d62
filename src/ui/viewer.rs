use iced::widget::{canvas, container, image, stack, text};
use iced::{alignment, event, keyboard, window, Color, ContentFit, Element, Event, Length, Padding, Size, Subscription, Task, Theme};

use super::canvas::BorderOverlay;
use super::sink::{IcedSink, SurfaceTexture};
use crate::config::Config;
use crate::error::ViewerError;
use crate::state::session::{Command, Flow, ViewerSession};

/// Main application state
pub struct Viewer {
    session: ViewerSession<SurfaceTexture>,
    sink: IcedSink,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A key mapped to a viewer command
    Command(Command),
    /// Window resized to a new logical size
    Resized(Size),
}

impl Viewer {
    fn new(session: ViewerSession<SurfaceTexture>, output: (u32, u32)) -> (Self, Task<Message>) {
        let mut viewer = Viewer {
            session,
            sink: IcedSink::new(output),
        };
        viewer.session.present(&mut viewer.sink);
        tracing::info!("🖼  {}", viewer.session.status_line());

        (viewer, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Command(command) => {
                if self.session.handle(command) == Flow::Quit {
                    self.session.shutdown(&mut self.sink);
                    return iced::exit();
                }
            }
            Message::Resized(size) => {
                self.sink.resize(size.width as u32, size.height as u32);
            }
        }

        self.session.present(&mut self.sink);
        Task::none()
    }

    /// Build the user interface from the last presented frame
    fn view(&self) -> Element<'_, Message> {
        let frame = self.sink.frame();
        let mut layers: Vec<Element<'_, Message>> = Vec::new();

        if let Some((handle, dest)) = &frame.image {
            let picture = image(handle.clone())
                .width(Length::Fixed(dest.width as f32))
                .height(Length::Fixed(dest.height as f32))
                .content_fit(ContentFit::Fill);

            layers.push(
                container(picture)
                    .padding(Padding {
                        top: dest.y as f32,
                        left: dest.x as f32,
                        right: 0.0,
                        bottom: 0.0,
                    })
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
            );
        }

        if let Some((rings, color)) = &frame.border {
            let overlay = BorderOverlay {
                rings: rings.clone(),
                color: *color,
            };
            layers.push(canvas(overlay).width(Length::Fill).height(Length::Fill).into());
        }

        layers.push(
            container(text(self.status_text()).size(14))
                .padding(8)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(alignment::Vertical::Bottom)
                .into(),
        );

        container(stack(layers))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                // Dark grey background behind the image
                background: Some(Color::from_rgb8(20, 20, 20).into()),
                ..container::Style::default()
            })
            .into()
    }

    fn status_text(&self) -> String {
        let (accepted, rejected, _) = self.session.catalog().review_counts();
        format!(
            "{}    ✓ {}  ✗ {}",
            self.session.detail_line(),
            accepted,
            rejected
        )
    }

    fn title(&self) -> String {
        format!("{} - Triage Viewer", self.session.status_line())
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|evt, status, _window| match evt {
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. })
                if status == event::Status::Ignored =>
            {
                command_for_key(key.as_ref()).map(Message::Command)
            }
            Event::Window(window::Event::Resized(size)) => Some(Message::Resized(size)),
            Event::Window(window::Event::CloseRequested) => Some(Message::Command(Command::Quit)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Key bindings for the viewer commands
pub fn command_for_key(key: keyboard::Key<&str>) -> Option<Command> {
    use keyboard::key::Named;
    use keyboard::Key;

    match key {
        Key::Named(Named::ArrowRight | Named::Space) => Some(Command::NavigateNext),
        Key::Named(Named::ArrowLeft) => Some(Command::NavigatePrevious),
        Key::Named(Named::ArrowUp | Named::Enter) => Some(Command::MarkAccepted),
        Key::Named(Named::ArrowDown | Named::Delete) => Some(Command::MarkRejectedOrToggle),
        Key::Named(Named::Escape) => Some(Command::Quit),
        Key::Character(c) => match c.to_ascii_lowercase().as_str() {
            "d" => Some(Command::NavigateNext),
            "a" => Some(Command::NavigatePrevious),
            "w" => Some(Command::MarkAccepted),
            "s" | "x" => Some(Command::MarkRejectedOrToggle),
            "q" => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Open the window and run the interactive phase until quit
pub fn run(session: ViewerSession<SurfaceTexture>, config: &Config) -> Result<(), ViewerError> {
    let (width, height) = config.window_size;

    iced::application(Viewer::title, Viewer::update, Viewer::view)
        .subscription(Viewer::subscription)
        .theme(Viewer::theme)
        .window(window::Settings {
            size: Size::new(width as f32, height as f32),
            position: window::Position::Centered,
            exit_on_close_request: false,
            ..window::Settings::default()
        })
        .run_with(move || Viewer::new(session, (width, height)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyboard::key::Named;
    use keyboard::Key;

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(Key::Named(Named::ArrowRight)), Some(Command::NavigateNext));
        assert_eq!(command_for_key(Key::Named(Named::Space)), Some(Command::NavigateNext));
        assert_eq!(command_for_key(Key::Character("A")), Some(Command::NavigatePrevious));
        assert_eq!(command_for_key(Key::Named(Named::ArrowUp)), Some(Command::MarkAccepted));
        assert_eq!(command_for_key(Key::Character("x")), Some(Command::MarkRejectedOrToggle));
        assert_eq!(command_for_key(Key::Named(Named::Escape)), Some(Command::Quit));
        assert_eq!(command_for_key(Key::Character("z")), None);
        assert_eq!(command_for_key(Key::Named(Named::Tab)), None);
    }
}
