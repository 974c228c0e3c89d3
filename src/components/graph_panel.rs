//! Graph tab: subject and dependency forms, path generation, and the canvas.

use leptos::prelude::*;

use super::{GraphCanvas, PlannerContext};

/// Forms for adding subjects and dependencies, plus the path action.
///
/// Field text lives in the graph editor, so it survives tab switches.
#[component]
pub fn GraphSidebar(ctx: PlannerContext) -> impl IntoView {
	let revisions = ctx.revisions;

	let add_subject = move |_| {
		ctx.spawn(&[revisions.graph], |p| async move {
			let _ = p.graph().add_subject_from_fields().await;
		});
	};

	let add_dependency = move |_| {
		ctx.spawn(&[revisions.graph], |p| async move {
			let _ = p.graph().add_dependency_from_fields().await;
		});
	};

	let generate_path = move |_| {
		ctx.spawn(&[revisions.graph, revisions.marks], |p| async move {
			let _ = p.generate_path().await;
		});
	};

	view! {
		<div class="panel">
			<h3>"1. Add Subject"</h3>
			<div class="input-group">
				<input
					placeholder="Subject Name"
					prop:value=move || {
						revisions.graph.track();
						ctx.planner().graph().fields().subject
					}
					on:input=move |ev| ctx.planner().graph().set_subject(&event_target_value(&ev))
				/>
				<button on:click=add_subject>"+"</button>
			</div>
		</div>
		<div class="panel">
			<h3>"2. Add Dependency"</h3>
			<input
				placeholder="Prerequisite (From)"
				prop:value=move || {
					revisions.graph.track();
					ctx.planner().graph().fields().prerequisite
				}
				on:input=move |ev| ctx.planner().graph().set_prerequisite(&event_target_value(&ev))
			/>
			<input
				placeholder="Dependent (To)"
				prop:value=move || {
					revisions.graph.track();
					ctx.planner().graph().fields().dependent
				}
				on:input=move |ev| ctx.planner().graph().set_dependent(&event_target_value(&ev))
			/>
			<button class="wide" on:click=add_dependency>"Link Subjects 🔗"</button>
		</div>
		<button class="generate-btn" on:click=generate_path>"🚀 Generate Path"</button>
	}
}

/// The graph canvas with the generated path overlaid.
#[component]
pub fn GraphPane(ctx: PlannerContext) -> impl IntoView {
	let revisions = ctx.revisions;
	let graph_view = Signal::derive(move || {
		revisions.graph.track();
		ctx.planner().graph().view()
	});

	let syncing = move || {
		revisions.graph.track();
		ctx.planner()
			.graph()
			.in_flight()
			.is_busy()
			.then(|| view! { <div class="syncing">"Syncing…"</div> })
	};

	let path_overlay = move || {
		revisions.graph.track();
		let path = ctx.planner().graph().path();
		(!path.is_empty()).then(|| {
			let steps = path
				.into_iter()
				.map(|step| {
					view! {
						<span class="arrow">"→"</span>
						<div class="step">{step}</div>
					}
				})
				.collect_view();
			view! {
				<div class="path-result">
					<strong>"Start"</strong>
					{steps}
					<span class="arrow">"→"</span>
					<strong>"Finish"</strong>
				</div>
			}
		})
	};

	view! {
		<GraphCanvas data=graph_view />
		{syncing}
		{path_overlay}
	}
}
