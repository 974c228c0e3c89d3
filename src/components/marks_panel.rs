//! Marks tab: score inputs for the current path and the ranking cards.

use leptos::either::Either;
use leptos::prelude::*;

use super::PlannerContext;
use crate::marks::{RankedTopic, Standing};

/// One numeric input per subject of the last generated path.
#[component]
pub fn MarksSidebar(ctx: PlannerContext) -> impl IntoView {
	let revisions = ctx.revisions;

	let inputs = move || {
		revisions.marks.track();
		let marks = ctx.planner().marks().marks();
		if marks.is_empty() {
			return Either::Left(view! {
				<p class="hint">"* Generate a study path first to populate this list."</p>
			});
		}
		let rows = marks
			.iter()
			.map(|(subject, score)| {
				let key = subject.to_string();
				// Stored without a rerender so the field keeps focus.
				view! {
					<div class="mark-row">
						<label>{subject.to_string()}</label>
						<input
							type="number"
							value=score.to_string()
							on:input=move |ev| {
								ctx.planner().marks().set_score(&key, &event_target_value(&ev));
							}
						/>
					</div>
				}
			})
			.collect_view();
		Either::Right(view! { <div class="mark-list">{rows}</div> })
	};

	let analyze = move |_| {
		ctx.spawn(&[revisions.marks], |p| async move {
			let _ = p.marks().submit().await;
		});
	};

	let analyze_button = move || {
		revisions.marks.track();
		ctx.planner()
			.marks()
			.can_submit()
			.then(|| view! { <button class="analyze-btn" on:click=analyze>"Analyze Weakness 📉"</button> })
	};

	view! {
		<div class="panel">
			<h3>"Enter Marks"</h3>
			{inputs}
			{analyze_button}
		</div>
	}
}

fn card(topic: RankedTopic) -> impl IntoView {
	let (class, badge) = match topic.standing {
		Standing::Weak => ("card weak", "⚠️"),
		Standing::Strong => ("card strong", "✅"),
	};
	view! {
		<div class=class>
			<h3>{topic.subject}</h3>
			<h1>{format!("{}%", topic.score)}</h1>
			<p class="standing">{format!("{} {}", badge, topic.standing.label())}</p>
		</div>
	}
}

/// Ranking returned by the service, weakest first.
#[component]
pub fn MarksPane(ctx: PlannerContext) -> impl IntoView {
	let revisions = ctx.revisions;

	let syncing = move || {
		revisions.marks.track();
		ctx.planner()
			.marks()
			.in_flight()
			.is_busy()
			.then(|| view! { <div class="syncing">"Syncing…"</div> })
	};

	let cards = move || {
		revisions.marks.track();
		let ranking = ctx.planner().marks().ranking();
		if ranking.is_empty() {
			Either::Left(view! {
				<div class="empty-state">
					<h3>"No marks submitted yet."</h3>
					<p>"Go to the sidebar to enter marks for your subjects."</p>
				</div>
			})
		} else {
			Either::Right(view! {
				<div class="cards">{ranking.into_iter().map(card).collect_view()}</div>
			})
		}
	};

	view! {
		<div class="pane">
			<h2>"📊 Performance Analysis"</h2>
			<p>"Topics are listed by priority, weakest first."</p>
			{syncing}
			{cards}
		</div>
	}
}
