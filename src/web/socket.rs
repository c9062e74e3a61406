use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use pokerroom_shared::{ClientEvent, ServerEvent};

use super::dom::DomView;
use crate::error::ChannelError;
use crate::realtime::{ConnectionState, EventSink, RealtimeGameView};

/// Writes events straight to the browser socket. Sends on a closed socket
/// are logged and lost.
pub struct WebSocketSink {
    ws: WebSocket,
}

impl EventSink for WebSocketSink {
    fn emit(&mut self, event: ClientEvent) {
        match serde_json::to_string(&event) {
            Ok(txt) => {
                if let Err(e) = self.ws.send_with_str(&txt) {
                    tracing::warn!(error = ?e, "failed to send client event");
                }
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize client event"),
        }
    }
}

type SharedGame = Rc<RefCell<RealtimeGameView<DomView, WebSocketSink>>>;

/// Browser websocket feeding a [`RealtimeGameView`] that paints into the DOM.
pub struct RoomSocket {
    ws: Option<WebSocket>,
    game: SharedGame,
    // Kept alive for as long as the socket may call them.
    _onopen: Option<Closure<dyn FnMut(Event)>>,
    _onmessage: Option<Closure<dyn FnMut(MessageEvent)>>,
    _onclose: Option<Closure<dyn FnMut(CloseEvent)>>,
}

impl RoomSocket {
    pub fn connect(
        url: &str,
        room: &str,
        username: &str,
        view: DomView,
    ) -> Result<Self, ChannelError> {
        let ws = WebSocket::new(url).map_err(|e| ChannelError::Connect {
            url: url.to_string(),
            reason: format!("{:?}", e),
        })?;
        let sink = WebSocketSink { ws: ws.clone() };
        let game: SharedGame = Rc::new(RefCell::new(RealtimeGameView::new(
            room, username, view, sink,
        )));

        let game_for_open = game.clone();
        let onopen = Closure::<dyn FnMut(Event)>::new(move |_e: Event| {
            game_for_open.borrow_mut().on_connect();
        });
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let game_for_msg = game.clone();
        let onmessage = Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| {
            let Some(txt) = e.data().as_string() else {
                return;
            };
            match serde_json::from_str::<ServerEvent>(&txt) {
                Ok(event) => game_for_msg.borrow_mut().handle_event(event),
                Err(err) => tracing::debug!(error = %err, raw = %txt, "ignoring undecodable frame"),
            }
        });
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let game_for_close = game.clone();
        let onclose = Closure::<dyn FnMut(CloseEvent)>::new(move |e: CloseEvent| {
            tracing::info!(code = e.code(), reason = %e.reason(), "room socket closed");
            game_for_close.borrow_mut().on_disconnect();
        });
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        Ok(Self {
            ws: Some(ws),
            game,
            _onopen: Some(onopen),
            _onmessage: Some(onmessage),
            _onclose: Some(onclose),
        })
    }

    pub fn send_action(&self, action: &str, amount: Option<serde_json::Number>) {
        self.game.borrow_mut().send_action(action, amount);
    }

    pub fn state(&self) -> ConnectionState {
        self.game.borrow().state()
    }

    pub fn close(&mut self) {
        if let Some(ws) = self.ws.take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onclose(None);
            if let Err(e) = ws.close() {
                tracing::debug!(error = ?e, "closing room socket");
            }
            self.game.borrow_mut().on_disconnect();
        }
        self._onopen = None;
        self._onmessage = None;
        self._onclose = None;
    }
}

impl Drop for RoomSocket {
    fn drop(&mut self) {
        self.close();
    }
}
