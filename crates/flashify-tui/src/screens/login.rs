//! Login / signup screen.
//!
//! A small form with an inline message line: auth failures are rendered next
//! to the form (verbatim from the server), never as a crash or a retry.
//! Signup never logs the user in — confirmation is out-of-band, so a
//! successful signup switches back to login mode with a notice.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::ScreenAction;
use crate::effects::UiEffect;

/// Which form the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// Focused form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    Confirm,
}

/// Login screen state.
#[derive(Debug)]
pub struct LoginScreen {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    /// Signup-only password confirmation.
    pub confirm: String,
    pub focus: LoginField,
    /// Inline error (red), e.g. the server's login failure message.
    pub error: Option<String>,
    /// Inline notice (green), e.g. the signup confirmation hint.
    pub notice: Option<String>,
    /// A request is in flight; submissions are dropped until it resolves.
    pub busy: bool,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            confirm: String::new(),
            focus: LoginField::Email,
            error: None,
            notice: None,
            busy: false,
        }
    }

    /// A login screen showing a notice (e.g. right after logout).
    pub fn with_notice(notice: &str) -> Self {
        Self {
            notice: Some(notice.to_string()),
            ..Self::new()
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> (Vec<UiEffect>, Option<ScreenAction>) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return (vec![], Some(ScreenAction::Quit)),
            KeyCode::Char('t') if ctrl => {
                self.toggle_mode();
                return (vec![], None);
            }
            _ => {}
        }

        if self.busy {
            // A request is in flight; ignore everything but quit/toggle.
            return (vec![], None);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => return (self.submit(), None),
            KeyCode::Backspace => {
                self.field_mut().pop();
                self.error = None;
            }
            KeyCode::Char(c) if !ctrl => {
                self.field_mut().push(c);
                self.error = None;
            }
            _ => {}
        }
        (vec![], None)
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.confirm.clear();
        self.focus = LoginField::Email;
        self.error = None;
        self.notice = None;
    }

    fn submit(&mut self) -> Vec<UiEffect> {
        let email = self.email.trim().to_string();
        let password = self.password.clone();

        if email.is_empty() || password.is_empty() {
            self.error = Some("Email and Password are required".to_string());
            return vec![];
        }

        match self.mode {
            AuthMode::Login => {
                self.busy = true;
                self.error = None;
                vec![UiEffect::Login { email, password }]
            }
            AuthMode::Signup => {
                if self.password != self.confirm {
                    self.error = Some("Passwords do not match.".to_string());
                    return vec![];
                }
                self.busy = true;
                self.error = None;
                vec![UiEffect::Signup { email, password }]
            }
        }
    }

    /// Applies a signup reply.
    pub fn on_signup_finished(&mut self, result: Result<Option<String>, String>) {
        self.busy = false;
        match result {
            // Ok(None) means the server accepted the registration.
            Ok(None) => {
                self.mode = AuthMode::Login;
                self.confirm.clear();
                self.password.clear();
                self.focus = LoginField::Email;
                self.error = None;
                self.notice = Some("Check your email for confirmation mail.".to_string());
            }
            Ok(Some(message)) | Err(message) => {
                self.error = Some(message);
                self.notice = None;
            }
        }
    }

    /// Applies a failed login (a successful one replaces the whole screen).
    pub fn on_login_failed(&mut self, message: String) {
        self.busy = false;
        self.notice = None;
        self.error = Some(message);
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
            LoginField::Confirm => &mut self.confirm,
        }
    }

    fn focus_next(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (LoginField::Email, _) => LoginField::Password,
            (LoginField::Password, AuthMode::Signup) => LoginField::Confirm,
            (LoginField::Password, AuthMode::Login) | (LoginField::Confirm, _) => LoginField::Email,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (LoginField::Email, AuthMode::Signup) => LoginField::Confirm,
            (LoginField::Email, AuthMode::Login) => LoginField::Password,
            (LoginField::Password, _) => LoginField::Email,
            (LoginField::Confirm, _) => LoginField::Password,
        };
    }

    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.mode {
            AuthMode::Login => &[
                ("Enter", "log in"),
                ("Tab", "next field"),
                ("Ctrl+T", "sign up"),
                ("Esc", "quit"),
            ],
            AuthMode::Signup => &[
                ("Enter", "create account"),
                ("Tab", "next field"),
                ("Ctrl+T", "log in"),
                ("Esc", "quit"),
            ],
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        let (title, field_count) = match self.mode {
            AuthMode::Login => ("Log in to Flashify", 2),
            AuthMode::Signup => ("Create a Flashify Account", 3),
        };

        let height = (field_count * 2 + 6).min(area.height as usize) as u16;
        let width = 48.min(area.width.saturating_sub(4));
        let popup = Rect::new(
            (area.width.saturating_sub(width)) / 2,
            (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Flashify ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(block, popup);

        let inner = Rect::new(
            popup.x + 2,
            popup.y + 1,
            popup.width.saturating_sub(4),
            popup.height.saturating_sub(2),
        );

        let title_line = Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(
            Paragraph::new(title_line).alignment(Alignment::Center),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );

        let mut y = inner.y + 2;
        self.render_field(frame, inner, &mut y, "Email", &self.email, LoginField::Email);
        let masked = "•".repeat(self.password.chars().count());
        self.render_field(frame, inner, &mut y, "Password", &masked, LoginField::Password);
        if self.mode == AuthMode::Signup {
            let masked = "•".repeat(self.confirm.chars().count());
            self.render_field(frame, inner, &mut y, "Confirm", &masked, LoginField::Confirm);
        }

        // Message line: busy spinner, error, or notice.
        let message = if self.busy {
            Some((format!("{spinner} Contacting server..."), Color::DarkGray))
        } else if let Some(error) = &self.error {
            Some((error.clone(), Color::Red))
        } else {
            self.notice
                .as_ref()
                .map(|notice| (notice.clone(), Color::Green))
        };
        if let Some((text, color)) = message
            && y < inner.y + inner.height
        {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))),
                Rect::new(inner.x, y, inner.width, 1),
            );
        }
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        inner: Rect,
        y: &mut u16,
        label: &str,
        value: &str,
        field: LoginField,
    ) {
        if *y >= inner.y + inner.height {
            return;
        }
        let focused = self.focus == field;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![
            Span::styled(format!("{label:<9}"), label_style),
            Span::raw(value.to_string()),
        ];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(inner.x, *y, inner.width, 1),
        );
        *y += 2;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_submit_emits_login_effect() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "ana@example.com");
        screen.handle_key(press(KeyCode::Tab));
        type_text(&mut screen, "secret");

        let (effects, action) = screen.handle_key(press(KeyCode::Enter));
        assert!(action.is_none());
        assert_eq!(
            effects,
            vec![UiEffect::Login {
                email: "ana@example.com".to_string(),
                password: "secret".to_string(),
            }]
        );
        assert!(screen.busy);
    }

    #[test]
    fn test_empty_fields_block_submission() {
        let mut screen = LoginScreen::new();
        let (effects, _) = screen.handle_key(press(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(
            screen.error.as_deref(),
            Some("Email and Password are required")
        );
    }

    #[test]
    fn test_signup_requires_matching_passwords() {
        let mut screen = LoginScreen::new();
        screen.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(screen.mode, AuthMode::Signup);

        type_text(&mut screen, "ana@example.com");
        screen.handle_key(press(KeyCode::Tab));
        type_text(&mut screen, "secret");
        screen.handle_key(press(KeyCode::Tab));
        type_text(&mut screen, "different");

        let (effects, _) = screen.handle_key(press(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(screen.error.as_deref(), Some("Passwords do not match."));
    }

    #[test]
    fn test_successful_signup_switches_back_to_login() {
        let mut screen = LoginScreen::new();
        screen.mode = AuthMode::Signup;
        screen.busy = true;
        screen.on_signup_finished(Ok(None));
        assert_eq!(screen.mode, AuthMode::Login);
        assert!(!screen.busy);
        assert_eq!(
            screen.notice.as_deref(),
            Some("Check your email for confirmation mail.")
        );
    }

    #[test]
    fn test_keys_ignored_while_busy() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "a@b.c");
        screen.handle_key(press(KeyCode::Tab));
        type_text(&mut screen, "pw");
        screen.handle_key(press(KeyCode::Enter));
        assert!(screen.busy);

        let before = screen.email.clone();
        type_text(&mut screen, "zzz");
        let (effects, _) = screen.handle_key(press(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(screen.email, before);
    }
}
