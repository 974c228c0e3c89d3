//! Syllabus tab: subject/module/topic form, the loaded tree and the
//! construction zone.

use leptos::either::Either;
use leptos::prelude::*;

use super::{PlannerContext, bump};
use crate::syllabus::ModuleEntry;

/// Root, branch and leaf fields with the add and save actions.
#[component]
pub fn SyllabusSidebar(ctx: PlannerContext) -> impl IntoView {
	let revisions = ctx.revisions;

	let add_topic = move |_| {
		if ctx.planner().syllabus().add_topic_from_fields() {
			bump(revisions.syllabus);
		}
	};

	let save = move |_| {
		let subject = ctx.planner().syllabus().fields().subject;
		ctx.spawn(&[revisions.syllabus], move |p| async move {
			let _ = p.syllabus().save(&subject).await;
		});
	};

	view! {
		<div class="panel">
			<h3>"Build Syllabus Tree"</h3>
			<label class="field-label root">"ROOT (Subject)"</label>
			<input
				placeholder="e.g. Computer Science"
				prop:value=move || {
					revisions.syllabus.track();
					ctx.planner().syllabus().fields().subject
				}
				on:input=move |ev| ctx.planner().syllabus().set_subject(&event_target_value(&ev))
			/>
			<div class="branch">
				<label class="field-label branch">"BRANCH (Module)"</label>
				<input
					placeholder="e.g. Algorithms"
					prop:value=move || {
						revisions.syllabus.track();
						ctx.planner().syllabus().fields().module
					}
					on:input=move |ev| ctx.planner().syllabus().set_module(&event_target_value(&ev))
				/>
				<div class="input-group">
					<input
						placeholder="Leaf (Topic)"
						prop:value=move || {
							revisions.syllabus.track();
							ctx.planner().syllabus().fields().topic
						}
						on:input=move |ev| ctx.planner().syllabus().set_topic(&event_target_value(&ev))
					/>
					<button on:click=add_topic>"+"</button>
				</div>
			</div>
			<button class="save-btn" on:click=save>"💾 Save Tree Structure"</button>
		</div>
	}
}

fn module_card(entry: ModuleEntry, class: &'static str) -> impl IntoView {
	let topics = entry
		.topics
		.into_iter()
		.map(|topic| view! { <li>{topic}</li> })
		.collect_view();
	view! {
		<div class=class>
			<strong>{format!("📂 {}", entry.name)}</strong>
			<ul>{topics}</ul>
		</div>
	}
}

/// The loaded tree (if any) above the working structure.
#[component]
pub fn SyllabusPane(ctx: PlannerContext) -> impl IntoView {
	let revisions = ctx.revisions;

	let load = move |_| {
		let subject = ctx.planner().syllabus().fields().subject;
		ctx.spawn(&[revisions.syllabus], move |p| async move {
			let _ = p.syllabus().load(&subject).await;
		});
	};

	let syncing = move || {
		revisions.syllabus.track();
		ctx.planner()
			.syllabus()
			.in_flight()
			.is_busy()
			.then(|| view! { <div class="syncing">"Syncing…"</div> })
	};

	let saved_tree = move || {
		revisions.syllabus.track();
		ctx.planner().syllabus().loaded().map(|tree| {
			let title = format!("📂 Saved Tree: {}", tree.subject());
			let modules = tree
				.modules()
				.into_iter()
				.map(|m| module_card(m, "module-card saved"))
				.collect_view();
			view! {
				<div class="saved-tree">
					<h3>{title}</h3>
					<div class="module-list">{modules}</div>
				</div>
			}
		})
	};

	let construction = move || {
		revisions.syllabus.track();
		let working = ctx.planner().syllabus().working();
		if working.is_empty() {
			Either::Left(view! {
				<div class="placeholder">"Your new tree structure will appear here as you build it."</div>
			})
		} else {
			let modules = working
				.modules()
				.iter()
				.cloned()
				.map(|m| module_card(m, "module-card working"))
				.collect_view();
			Either::Right(view! { <div class="module-list">{modules}</div> })
		}
	};

	view! {
		<div class="pane">
			<div class="pane-header">
				<h2>"🌳 Syllabus Hierarchy"</h2>
				<button class="load-btn" on:click=load>"🔍 Load Saved Tree"</button>
			</div>
			{syncing}
			{saved_tree}
			<h4 class="zone-title">"🚧 Construction Zone (New)"</h4>
			<p class="hint">"Use the sidebar to add Modules and Topics here before saving."</p>
			{construction}
		</div>
	}
}
