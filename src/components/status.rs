//! Persistent connectivity indicator fed by the liveness check.

use leptos::prelude::*;

use crate::api::ConnectionState;

#[component]
pub fn ConnectionStatus(#[prop(into)] state: Signal<ConnectionState>) -> impl IntoView {
	let indicator_class = move || match state.get() {
		ConnectionState::Connected => "status-indicator connected",
		ConnectionState::Error => "status-indicator error",
		ConnectionState::Unknown => "status-indicator",
	};
	let text = move || match state.get() {
		ConnectionState::Connected => "Connected",
		ConnectionState::Error => "Connection error",
		ConnectionState::Unknown => "Connecting...",
	};

	view! {
		<div class="connection-status">
			<span class=indicator_class></span>
			<span class="status-text">{text}</span>
		</div>
	}
}
