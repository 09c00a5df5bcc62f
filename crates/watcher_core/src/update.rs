use crate::{
    apply_retention, format_digest, format_status, AppState, Channel, CycleReport, Effect, Msg,
    Phase, ScrapeStop,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current phase are ignored.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Launched => {
            if state.phase() != Phase::Startup {
                return (state, Vec::new());
            }
            state.set_phase(Phase::Idle);
            vec![Effect::Notify {
                channel: Channel::Status,
                text: state.settings().messages.startup.clone(),
            }]
        }
        Msg::CycleStarted { started_at } => {
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            state.begin_cycle(started_at);
            vec![Effect::LoadSnapshot]
        }
        Msg::SnapshotLoaded(outcome) => {
            if state.phase() != Phase::Loading {
                return (state, Vec::new());
            }
            state.set_previous(outcome.into_snapshot());
            state.set_phase(Phase::Scraping { page: 1 });
            vec![Effect::FetchPage { page: 1 }]
        }
        Msg::PageFetched { page, result } => {
            if state.phase() != (Phase::Scraping { page }) {
                return (state, Vec::new());
            }
            match result {
                Ok(links) if links.is_empty() => finish_cycle(&mut state, page, ScrapeStop::EmptyPage),
                Ok(links) => {
                    state.extend_scraped(links);
                    if page >= state.settings().max_pages {
                        finish_cycle(&mut state, page, ScrapeStop::PageLimit)
                    } else {
                        let next = page + 1;
                        state.set_phase(Phase::Scraping { page: next });
                        vec![Effect::FetchPage { page: next }]
                    }
                }
                Err(_) => finish_cycle(&mut state, page, ScrapeStop::FetchFailed),
            }
        }
    };

    (state, effects)
}

fn finish_cycle(state: &mut AppState, pages_fetched: u32, stop: ScrapeStop) -> Vec<Effect> {
    let settings = state.settings().clone();
    let complete = stop == ScrapeStop::EmptyPage;
    let outcome = apply_retention(
        state.previous(),
        state.scraped(),
        complete,
        settings.removal_grace_cycles,
    );
    let total_count = state.scraped().len();

    let mut effects = Vec::new();
    for text in format_digest(
        &settings.messages.new_header,
        &outcome.added,
        settings.message_limit,
    ) {
        effects.push(Effect::Notify {
            channel: Channel::NewListings,
            text,
        });
    }
    for text in format_digest(
        &settings.messages.removed_header,
        &outcome.removed,
        settings.message_limit,
    ) {
        effects.push(Effect::Notify {
            channel: Channel::RemovedListings,
            text,
        });
    }
    effects.push(Effect::SaveSnapshot(outcome.snapshot.clone()));
    effects.push(Effect::Notify {
        channel: Channel::Status,
        text: format_status(
            &settings.messages.status_template,
            total_count,
            state.started_at(),
        ),
    });

    let report = CycleReport {
        pages_fetched,
        total_count,
        added: outcome.added.len(),
        removed: outcome.removed.len(),
        stop,
    };
    state.finish_cycle(outcome.snapshot, report.clone());
    effects.push(Effect::CycleFinished(report));
    effects
}
