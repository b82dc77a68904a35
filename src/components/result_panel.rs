//! Renders one [`PanelView`] into one result box. The component only ever
//! touches its own subtree, so a panel can never overwrite a sibling.

use leptos::prelude::*;

use crate::render::{PanelView, Section};

#[component]
pub fn ResultPanel(#[prop(into)] view: Signal<Option<PanelView>>) -> impl IntoView {
	move || {
		view.get().map(|panel| {
			let class = format!("result-box visible {}", panel.outcome.class());
			view! {
				<div class=class>
					{panel.title.map(|title| view! { <h4>{title}</h4> })}
					{panel
						.sections
						.into_iter()
						.map(section_view)
						.collect_view()}
				</div>
			}
		})
	}
}

fn section_view(section: Section) -> impl IntoView {
	let Section {
		heading,
		lines,
		preformatted,
	} = section;
	view! {
		<div class="result-item">
			{heading.map(|heading| view! { <h4>{heading}</h4> })}
			{if preformatted {
				view! { <pre>{lines.join("\n")}</pre> }.into_any()
			} else {
				lines
					.into_iter()
					.map(|line| view! { <p>{line}</p> })
					.collect_view()
					.into_any()
			}}
		</div>
	}
}
