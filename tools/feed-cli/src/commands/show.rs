//! Render one feed page.

use anyhow::{anyhow, Result};
use feed_core::{FeedItem, Pagination};
use feed_state::{FeedController, FeedViewModel};
use feed_views::render_feed_page;
use serde::Serialize;

use super::ShowArgs;
use crate::context::Context;

#[derive(Serialize)]
struct FeedOutput<'a> {
    user_id: Option<&'a str>,
    category: Option<&'a str>,
    pagination: Pagination,
    items: &'a [FeedItem],
}

impl<'a> From<&'a FeedViewModel> for FeedOutput<'a> {
    fn from(view: &'a FeedViewModel) -> Self {
        Self {
            user_id: view.selected_user_id.as_deref(),
            category: view.category.as_deref(),
            pagination: Pagination::new(view.page, view.page_size, view.total),
            items: &view.items,
        }
    }
}

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    ctx.require_login()?;
    let controller = FeedController::from_config(ctx.gateway()?, &ctx.config);

    // Filters before the user so only the final key is fetched.
    if args.category.is_some() {
        controller.set_category(args.category.as_deref());
    }
    if args.signals {
        controller.toggle_signals();
    }
    if let Some(user) = args.user {
        controller.set_user(user);
    }

    let spinner = ctx.output.spinner("Loading feed...");
    controller.start();
    let mut view = controller.settled().await;
    if args.page != 1 && view.feed_error.is_none() {
        controller.set_page(args.page);
        view = controller.settled().await;
        if i64::from(view.page) != args.page {
            ctx.output.warn(&format!(
                "Page {} is out of range, showing page {} of {}",
                args.page, view.page, view.total_pages
            ));
        }
    }
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&FeedOutput::from(view.as_ref()));
    } else {
        ctx.output.page(&render_feed_page(&view));
        let pagination = Pagination::new(view.page, view.page_size, view.total);
        if pagination.total > 0 {
            ctx.output.debug(&format!(
                "Items {}-{} of {}",
                pagination.start_item(),
                pagination.end_item(),
                pagination.total
            ));
        }
    }

    if let Some(e) = view.users_error.as_ref().or(view.feed_error.as_ref()) {
        return Err(anyhow!(e.clone()).context("Failed to load data"));
    }
    Ok(())
}
