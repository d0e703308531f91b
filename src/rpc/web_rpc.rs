use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::ViewerState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::material::{LayerToggle, TextureLayer};
use crate::engine::systems::viewport::ViewportResizeEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing RPC traffic between the host page and the viewer.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send a notification to the host without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications queued for the next flush to the host, oldest first.
    pub fn pending_notifications(&self) -> impl Iterator<Item = &RpcNotification> {
        self.outgoing_notifications.iter()
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage RPC layer.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            // Cheap pre-filter before queueing; full parsing happens on
            // the app side.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Ownership moves to the JS side for the page's lifetime.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Thread-safe queue bridging the JS message callback and the app.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw RPC message received from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    viewer_state: Res<State<ViewerState>>,
    progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut toggle_events: EventWriter<LayerToggle>,
    mut resize_events: EventWriter<ViewportResizeEvent>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(
                    &request,
                    &diagnostics,
                    &viewer_state,
                    &progress,
                    &mut toggle_events,
                    &mut resize_events,
                ) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {parse_error}")
                    }),
                );
            }
        }
    }
}

/// Dispatch a single RPC request. Only requests carrying an id produce a
/// response; notifications are processed silently.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    viewer_state: &State<ViewerState>,
    progress: &LoadingProgress,
    toggle_events: &mut EventWriter<LayerToggle>,
    resize_events: &mut EventWriter<ViewportResizeEvent>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "toggle_albedo" => handle_layer_toggle(&request.params, TextureLayer::Albedo, toggle_events),
        "toggle_lightmap" => {
            handle_layer_toggle(&request.params, TextureLayer::Lightmap, toggle_events)
        }
        "viewport_resize" => handle_viewport_resize(&request.params, resize_events),
        "get_viewer_state" => handle_get_viewer_state(viewer_state, progress),
        "get_fps" => handle_get_fps(diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let id = request.id.clone()?;
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Toggle a texture layer. Valid at any time; a toggle that arrives while
/// the asset is still loading is remembered and applied once wiring runs.
fn handle_layer_toggle(
    params: &serde_json::Value,
    layer: TextureLayer,
    toggle_events: &mut EventWriter<LayerToggle>,
) -> Result<serde_json::Value, RpcError> {
    let active = parse_toggle_params(params)?;
    toggle_events.write(LayerToggle { layer, active });
    info!("Layer toggle dispatched: {layer:?} -> {active}");
    Ok(serde_json::json!({ "success": true, "active": active }))
}

fn handle_viewport_resize(
    params: &serde_json::Value,
    resize_events: &mut EventWriter<ViewportResizeEvent>,
) -> Result<serde_json::Value, RpcError> {
    let (width, height) = parse_resize_params(params)?;
    resize_events.write(ViewportResizeEvent { width, height });
    Ok(serde_json::json!({ "success": true }))
}

fn handle_get_viewer_state(
    viewer_state: &State<ViewerState>,
    progress: &LoadingProgress,
) -> Result<serde_json::Value, RpcError> {
    let states: Vec<serde_json::Value> = progress
        .loading_states()
        .into_iter()
        .map(|(name, loaded)| serde_json::json!({ "asset": name, "loaded": loaded }))
        .collect();
    Ok(serde_json::json!({
        "state": format!("{:?}", viewer_state.get()),
        "assets": states
    }))
}

fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({ "fps": fps }))
}

fn parse_toggle_params(params: &serde_json::Value) -> Result<bool, RpcError> {
    #[derive(Deserialize)]
    struct ToggleParams {
        active: bool,
    }

    serde_json::from_value::<ToggleParams>(params.clone())
        .map(|toggle| toggle.active)
        .map_err(|_| RpcError::invalid_params("Expected boolean 'active' parameter"))
}

fn parse_resize_params(params: &serde_json::Value) -> Result<(f32, f32), RpcError> {
    #[derive(Deserialize)]
    struct ResizeParams {
        width: f32,
        height: f32,
    }

    let parsed = serde_json::from_value::<ResizeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'width' and 'height' parameters"))?;
    if parsed.width <= 0.0 || parsed.height <= 0.0 {
        return Err(RpcError::invalid_params(
            "'width' and 'height' must be positive",
        ));
    }
    Ok((parsed.width, parsed.height))
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Flush queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    if rpc_interface.outgoing_notifications.is_empty()
        && rpc_interface.outgoing_responses.is_empty()
    {
        return;
    }

    // Notifications first, responses second, to keep ordering stable.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Serialize a message to the parent window hosting the viewer iframe.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}
