use leptos::prelude::*;

use super::{PlannerContext, bump};
use crate::controller::Tab;

/// The three tab buttons.
#[component]
pub fn TabBar(ctx: PlannerContext) -> impl IntoView {
	let buttons = Tab::ALL
		.into_iter()
		.map(|tab| {
			let class = move || {
				ctx.revisions.tab.track();
				if ctx.planner().active_tab() == tab {
					"active-btn"
				} else {
					""
				}
			};
			let on_click = move |_| {
				ctx.planner().select(tab);
				bump(ctx.revisions.tab);
			};
			view! { <button class=class on:click=on_click>{tab.label()}</button> }
		})
		.collect_view();

	view! { <div class="nav-buttons">{buttons}</div> }
}
