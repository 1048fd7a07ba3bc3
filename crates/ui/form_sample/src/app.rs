use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, KeyEventKind};
use form::{payload_to_json, FormComponent, FormEvent};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::tui::Tui;
use crate::ui::{render::RenderContext, render_form, FormView, Palette};

const TICK: Duration = Duration::from_millis(100);

pub struct App {
    form: FormComponent,
    view: FormView,
    palette: Palette,
    title: String,
    should_quit: bool,
    status: Option<String>,
    last_submission: Option<String>,
}

impl App {
    pub fn new(mut form: FormComponent, palette: Palette, title: String) -> Self {
        form.subscribe(|event| match event {
            FormEvent::Submitted(payload) => {
                info!(fields = payload.len(), "form submitted");
            }
            FormEvent::Cancelled => info!("form canceled"),
        });
        Self {
            form,
            view: FormView::new(),
            palette,
            title,
            should_quit: false,
            status: None,
            last_submission: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| {
                let ctx = RenderContext {
                    form: &self.form,
                    palette: &self.palette,
                    title: &self.title,
                    result: self.last_submission.as_deref(),
                    status: self.status.as_deref(),
                };
                render_form(&ctx, &mut self.view, f, f.area());
            })?;

            let Some(event) = tui.next_event(TICK)? else {
                continue;
            };
            if let Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = self.view.handle_key_events(&mut self.form, key)? {
                    self.update(action)?;
                }
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<()> {
        if action != Action::Update {
            debug!(%action, "handling action");
        }
        match action {
            Action::Update => {}
            Action::Submit => match self.form.on_submit() {
                Some(FormEvent::Submitted(payload)) => {
                    let json = serde_json::to_string_pretty(&payload_to_json(&payload))?;
                    self.last_submission = Some(json);
                    self.status = Some("Submitted".to_string());
                }
                _ => {
                    warn!("submit blocked by validation errors");
                    self.status = Some("Please fix the highlighted fields".to_string());
                }
            },
            Action::Cancel => {
                self.form.on_cancel();
                self.view.reset();
                self.status = Some("Canceled".to_string());
            }
            Action::Reset => {
                self.form.reset();
                self.view.reset();
                self.status = None;
            }
            Action::Quit => self.should_quit = true,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form::{FieldDescriptor, FieldKind, FormSchema, ValidationRule};
    use pretty_assertions::assert_eq;

    fn app() -> App {
        let schema = FormSchema::new(vec![FieldDescriptor::new("email", "Email", FieldKind::Email)
            .validators([ValidationRule::Required, ValidationRule::Email])])
        .unwrap();
        App::new(FormComponent::new(schema).unwrap(), Palette::default(), "Test".into())
    }

    #[test]
    fn invalid_submit_sets_status_only() {
        let mut app = app();
        app.update(Action::Submit).unwrap();
        assert!(app.last_submission.is_none());
        assert_eq!(app.status.as_deref(), Some("Please fix the highlighted fields"));
        assert!(app.form.control("email").unwrap().touched);
    }

    #[test]
    fn valid_submit_stores_json() {
        let mut app = app();
        app.form.set_value("email", "ada@example.com").unwrap();
        app.update(Action::Submit).unwrap();
        let json = app.last_submission.clone().unwrap();
        assert!(json.contains("\"email\": \"ada@example.com\""));
        assert_eq!(app.status.as_deref(), Some("Submitted"));
    }

    #[test]
    fn cancel_and_reset_restore_initial_values() {
        let mut app = app();
        app.form.set_value("email", "x").unwrap();
        app.update(Action::Cancel).unwrap();
        assert_eq!(app.form.value()["email"].display(), "");

        app.form.set_value("email", "y").unwrap();
        app.update(Action::Reset).unwrap();
        assert_eq!(app.form.value()["email"].display(), "");
        assert!(app.status.is_none());
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app();
        app.update(Action::Quit).unwrap();
        assert!(app.should_quit);
    }
}
