//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }

        tracing::debug!("App actor stopped");
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus
            UiEvent::NextFocus => self.state.next_focus(),
            UiEvent::PrevFocus => self.state.prev_focus(),
            UiEvent::ClickRequestBar => self.state.click_request_bar(),
            UiEvent::ClickResponse => self.state.click_response(),

            // Method
            UiEvent::NextMethod => self.state.next_method(),
            UiEvent::PrevMethod => self.state.prev_method(),

            // Input editing
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Paste(text) => self.state.paste(&text),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::Delete => self.state.delete_char_forward(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::CursorHome => self.state.move_cursor_home(),
            UiEvent::CursorEnd => self.state.move_cursor_end(),
            UiEvent::CursorUp => self.state.move_cursor_up(),
            UiEvent::CursorDown => self.state.move_cursor_down(),

            // Request actions
            UiEvent::SendRequest => {
                if let Some(cmd) = self.state.prepare_request() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::CancelRequest => {
                if let Some(cmd) = self.state.cancel_request() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::ExportCurl => self.state.export_curl(),

            // Response viewer
            UiEvent::ToggleFullscreen => self.state.toggle_fullscreen(),
            UiEvent::ToggleResponseView => self.state.toggle_response_view(),
            UiEvent::ScrollUp(lines) => self.state.scroll_up(lines),
            UiEvent::ScrollDown(lines) => self.state.scroll_down(lines),
            UiEvent::HalfPageUp => self.state.half_page_up(),
            UiEvent::HalfPageDown => self.state.half_page_down(),
            UiEvent::ScrollTop => self.state.scroll_top(),
            UiEvent::ScrollBottom => self.state.scroll_bottom(),

            // Headers
            UiEvent::OpenHeaderForm => self.state.open_header_form(),
            UiEvent::CloseHeaderForm => self.state.close_header_form(),
            UiEvent::NewHeader => self.state.new_header(),
            UiEvent::NextHeader => self.state.next_header(),
            UiEvent::PrevHeader => self.state.prev_header(),
            UiEvent::DeleteHeader => self.state.delete_header(),
            UiEvent::EditHeader => self.state.edit_header(),
            UiEvent::SwitchHeaderField => self.state.switch_header_field(),
            UiEvent::SaveHeader => self.state.save_header(),
            UiEvent::CancelHeaderEdit => self.state.cancel_header_edit(),

            // cURL
            UiEvent::ShowCurlImport => self.state.show_curl_import(),
            UiEvent::ImportCurl => self.state.import_curl(),
            UiEvent::CancelCurlImport => self.state.cancel_curl_import(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Resize(width, height) => self.state.resize(width, height),
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_and_quit_flow() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(&Config::default(), net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        let initial = render_rx.recv().await.expect("initial render");
        assert!(initial.url.is_empty());

        ui_tx.send(UiEvent::ShowCurlImport).unwrap();
        ui_tx
            .send(UiEvent::Paste("curl -X POST http://localhost:9/items".into()))
            .unwrap();
        ui_tx.send(UiEvent::ImportCurl).unwrap();
        ui_tx.send(UiEvent::SendRequest).unwrap();

        let id = match net_cmd_rx.recv().await {
            Some(NetworkCommand::Execute { id, request }) => {
                assert_eq!(request.url, "http://localhost:9/items");
                id
            }
            other => panic!("unexpected command: {:?}", other),
        };

        net_resp_tx
            .send(NetworkResponse::Success {
                id,
                status: "201 Created".into(),
                headers: String::new(),
                body: "ok".into(),
                is_json: false,
                time_ms: 5,
            })
            .unwrap();

        let mut last = initial;
        while last.response.status != "201 Created" {
            last = render_rx.recv().await.expect("render state");
        }
        assert!(!last.is_loading);
        assert_eq!(last.response_content, "ok\n");

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();
    }
}
