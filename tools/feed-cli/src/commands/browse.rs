//! Interactive feed browser.

use std::io;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _, Result};
use console::{style, Key};
use dialoguer::Select;
use feed_core::CATEGORIES;
use feed_observability::SessionMetrics;
use feed_state::{FeedController, FeedViewModel};
use feed_views::{category_options, render_feed_page, user_options};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::phase_badge;

const KEY_HELP: &str =
    "[n] next  [p] previous  [u] user  [c] category  [s] signals  [r] refresh  [l] logout  [q] quit";

/// What a key press asks the browser to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    Signals,
    Refresh,
    PickUser,
    PickCategory,
    Logout,
    Quit,
}

impl Action {
    fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Char('n') | Key::ArrowRight => Some(Self::Next),
            Key::Char('p') | Key::ArrowLeft => Some(Self::Previous),
            Key::Char('s') => Some(Self::Signals),
            Key::Char('r') => Some(Self::Refresh),
            Key::Char('u') => Some(Self::PickUser),
            Key::Char('c') => Some(Self::PickCategory),
            Key::Char('l') => Some(Self::Logout),
            Key::Char('q') | Key::Escape => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Next thing the browse loop reacts to.
#[derive(Debug)]
enum Event {
    Redraw(Arc<FeedViewModel>),
    Key(Key),
}

/// Wait for either a new view snapshot or the pending key read.
///
/// The key read is left running when a snapshot wins, so no key press is lost.
async fn next_event(
    views: &mut watch::Receiver<Arc<FeedViewModel>>,
    read: &mut JoinHandle<io::Result<Key>>,
) -> Result<Event> {
    tokio::select! {
        key = read => {
            let key = key.context("Key reader stopped")?.context("Failed to read key")?;
            Ok(Event::Key(key))
        }
        Ok(()) = views.changed() => Ok(Event::Redraw(views.borrow_and_update().clone())),
    }
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    ctx.require_login()?;
    if ctx.output.is_json() {
        bail!("browse is interactive and has no JSON output");
    }

    let controller = FeedController::from_config(ctx.gateway()?, &ctx.config);
    let mut views = controller.subscribe();
    if args.category.is_some() {
        controller.set_category(args.category.as_deref());
    }
    if let Some(user) = args.user {
        controller.set_user(user);
    }
    controller.start();

    loop {
        let view = views.borrow_and_update().clone();
        draw(ctx, &view);

        let term = ctx.output.term().clone();
        let mut read = tokio::task::spawn_blocking(move || term.read_key());
        let key = loop {
            match next_event(&mut views, &mut read).await? {
                Event::Redraw(view) => draw(ctx, &view),
                Event::Key(key) => break key,
            }
        };

        let Some(action) = Action::from_key(&key) else {
            continue;
        };
        match action {
            Action::Next => controller.next_page(),
            Action::Previous => controller.previous_page(),
            Action::Signals => controller.toggle_signals(),
            Action::Refresh => controller.refresh(),
            Action::PickUser => {
                let view = controller.snapshot();
                if let Some(user_id) = prompt(move || pick_user(&view)).await? {
                    controller.set_user(user_id);
                }
            }
            Action::PickCategory => {
                let view = controller.snapshot();
                if let Some(category) = prompt(move || pick_category(&view)).await? {
                    controller.set_category(category);
                }
            }
            Action::Logout => {
                ctx.gate.logout().context("Failed to clear session")?;
                ctx.output.success("Logged out.");
                break;
            }
            Action::Quit => break,
        }
    }

    let metrics = SessionMetrics::new()
        .with_cache("users", controller.client().users_cache().stats())
        .with_cache("feed", controller.client().feed_cache().stats());
    metrics.log();
    if args.metrics {
        ctx.output.header(&format!("Query cache ({} fetches)", metrics.total_fetches()));
        for line in metrics.to_human().lines() {
            ctx.output.list_item(line);
        }
    }
    Ok(())
}

fn draw(ctx: &Context, view: &FeedViewModel) {
    ctx.output.clear_screen();
    ctx.output.page(&render_feed_page(view));
    println!();
    println!("{}  {}", phase_badge(view.phase), style(KEY_HELP).dim());
}

/// Run a blocking terminal prompt off the runtime thread.
async fn prompt<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow!(e).context("Prompt stopped"))?
}

fn pick_user(view: &FeedViewModel) -> Result<Option<String>> {
    if view.users.is_empty() {
        return Ok(None);
    }
    let current = view
        .selected_user_id
        .as_deref()
        .and_then(|id| view.users.iter().position(|u| u.id == id))
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("User")
        .items(&user_options(&view.users))
        .default(current)
        .interact_opt()?;
    Ok(choice.map(|idx| view.users[idx].id.clone()))
}

/// `Some(None)` selects all categories; `None` means the prompt was cancelled.
fn pick_category(view: &FeedViewModel) -> Result<Option<Option<&'static str>>> {
    let current = view
        .category
        .as_deref()
        .and_then(|c| CATEGORIES.iter().position(|known| *known == c))
        .map_or(0, |idx| idx + 1);

    let choice = Select::new()
        .with_prompt("Category filter")
        .items(&category_options())
        .default(current)
        .interact_opt()?;
    Ok(choice.map(|idx| idx.checked_sub(1).map(|i| CATEGORIES[i])))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use feed_core::{ClientConfig, FeedError, FeedResponse, QueryKey, Report, User};
    use feed_data::FeedGateway;
    use feed_state::LoadPhase;

    use super::*;

    /// Gateway whose feed request never completes.
    struct StalledFeed;

    #[async_trait]
    impl FeedGateway for StalledFeed {
        async fn users(&self) -> Result<Vec<User>, FeedError> {
            Ok(vec![User {
                id: "u1".into(),
                name: "Dana".into(),
                role: "Analyst".into(),
                focus_categories: vec![],
                focus_tags: vec![],
            }])
        }

        async fn reports(&self) -> Result<Vec<Report>, FeedError> {
            Ok(Vec::new())
        }

        async fn feed(&self, _key: &QueryKey) -> Result<FeedResponse, FeedError> {
            std::future::pending().await
        }
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Action::from_key(&Key::Char('n')), Some(Action::Next));
        assert_eq!(Action::from_key(&Key::ArrowLeft), Some(Action::Previous));
        assert_eq!(Action::from_key(&Key::Char('c')), Some(Action::PickCategory));
        assert_eq!(Action::from_key(&Key::Char('l')), Some(Action::Logout));
        assert_eq!(Action::from_key(&Key::Escape), Some(Action::Quit));
        assert_eq!(Action::from_key(&Key::Char('x')), None);
    }

    #[tokio::test]
    async fn test_keys_accepted_while_feed_is_loading() {
        let controller = FeedController::from_config(Arc::new(StalledFeed), &ClientConfig::default());
        let mut views = controller.subscribe();
        controller.start();

        let mut read: JoinHandle<io::Result<Key>> = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Key::Char('n'))
        });

        let key = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                match next_event(&mut views, &mut read).await? {
                    Event::Redraw(_) => continue,
                    Event::Key(key) => return Ok::<_, anyhow::Error>(key),
                }
            }
        })
        .await
        .expect("key press was not delivered")
        .unwrap();

        assert_eq!(key, Key::Char('n'));
        assert_eq!(controller.snapshot().phase, LoadPhase::Loading);
    }

    #[tokio::test]
    async fn test_snapshot_wins_over_pending_key() {
        let controller = FeedController::from_config(Arc::new(StalledFeed), &ClientConfig::default());
        let mut views = controller.subscribe();
        views.borrow_and_update();
        let mut read: JoinHandle<io::Result<Key>> = tokio::spawn(std::future::pending());

        controller.toggle_signals();
        let event = next_event(&mut views, &mut read).await.unwrap();
        match event {
            Event::Redraw(view) => assert!(view.show_signals),
            Event::Key(key) => panic!("unexpected key {:?}", key),
        }
        assert!(!read.is_finished());
        read.abort();
    }
}
