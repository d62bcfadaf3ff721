//! Command execution for the CLI

use anyhow::{anyhow, Context};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use broadcast_console::api::models::{
    AdItemCreate, CampaignCreate, ConfigUpdate, FeedCreate, NewsItem, ProgramCreate,
    VotingConfig,
};
use broadcast_console::api::{join_filter_list, parse_filter_list};
use broadcast_console::config::Settings;
use broadcast_console::console::{
    AdminConsole, HeadlineDraft, MediaDesk, NewsDesk, OverlayForm, Preferences, StreamMonitor,
    StreamTarget,
};
use broadcast_console::ApiClient;

use crate::cli::{
    AdsAction, Commands, ConfigAction, ConfigSetArgs, FeedsAction, FiltersAction, HeadlineArgs,
    NewsAction, OverlayAction, ProgramsAction, StreamAction, VotingAction,
};

/// Output mode shared by all commands
#[derive(Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    fn value<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn news(&self, items: &[NewsItem]) -> anyhow::Result<()> {
        if self.json {
            return self.value(&items);
        }
        if items.is_empty() {
            println!("No active news");
            return Ok(());
        }
        for item in items {
            let created = item
                .created_at_utc()
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:>5}  {:<16} {:<8} {:<10} {:<3} {}",
                item.id,
                created,
                item.news_type,
                item.category,
                if item.is_active { "on" } else { "off" },
                item.title_tamil
            );
        }
        Ok(())
    }

    fn ack(&self, what: &str) {
        if !self.json {
            println!("{}", what);
        }
    }
}

pub async fn run(
    command: Commands,
    config_path: &Path,
    settings: Settings,
    out: Output,
) -> anyhow::Result<()> {
    let client = ApiClient::new(&settings)?;

    match command {
        Commands::Init { force } => init(config_path, force, &settings, out),
        Commands::Watch => watch(settings).await,
        Commands::News { action } => news(action, &client, &settings, out).await,
        Commands::Stream { action } => stream(action, &client, &settings, out).await,
        Commands::Overlay { action } => overlay(action, &client, out).await,
        Commands::Upload { file, main_screen } => upload(&file, main_screen, &client, out).await,
        Commands::Media => media(&client, out).await,
        Commands::Config { action } => layout(action, &client, &settings, out).await,
        Commands::Filters { action } => filters(action, &client, out).await,
        Commands::Feeds { action } => feeds(action, &client, out).await,
        Commands::Ads { action } => ads(action, &client, out).await,
        Commands::Programs { action } => programs(action, &client, out).await,
        Commands::Voting { action } => voting(action, &client, out).await,
    }
}

fn init(path: &Path, force: bool, settings: &Settings, out: Output) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists, use --force to replace it",
            path.display()
        ));
    }

    settings
        .save_to_path(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Configuration written");
    out.ack(&format!("Wrote {}", path.display()));
    Ok(())
}

async fn watch(settings: Settings) -> anyhow::Result<()> {
    let console = AdminConsole::new(settings)?;
    console.start().await?;

    let mut news_rev = console.news().subscribe();
    let mut status = console.stream().subscribe();
    let mut logs = console.logs().subscribe();

    print_queue(console.news()).await;
    println!("[stream] {}", console.stream().current().label());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = news_rev.changed() => {
                if changed.is_err() {
                    break;
                }
                print_queue(console.news()).await;
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *status.borrow_and_update();
                let note = if state.reachable { "" } else { " (server unreachable)" };
                println!("[stream] {}{}", state.label(), note);
            }
            line = logs.recv() => match line {
                Ok(line) => println!("[log] {}", line),
                Err(RecvError::Lagged(skipped)) => println!("[log] ... {} lines skipped", skipped),
                Err(RecvError::Closed) => break,
            },
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    console.shutdown().await;
    Ok(())
}

async fn print_queue(desk: &NewsDesk) {
    let stats = desk.stats().await;
    println!(
        "[news] {} items, {} live tickers, breaking: {}, drafts: {}",
        stats.total,
        stats.active_tickers,
        if stats.breaking_active { "ACTIVE" } else { "NONE" },
        stats.drafts
    );
}

fn draft_from(args: HeadlineArgs, publish: bool) -> HeadlineDraft {
    HeadlineDraft {
        title: args.title,
        news_type: args.news_type,
        category: args.category,
        priority: args.priority,
        publish,
        media_url: args.media_url,
    }
}

async fn news(
    action: NewsAction,
    client: &ApiClient,
    settings: &Settings,
    out: Output,
) -> anyhow::Result<()> {
    let desk = NewsDesk::new(client.clone(), settings.console.admin_view);

    match action {
        NewsAction::List => {
            desk.refresh().await?;
            out.news(&desk.items().await)
        }
        NewsAction::Pending => {
            let desk = NewsDesk::new(client.clone(), true);
            desk.refresh().await?;
            out.news(&desk.pending().await)
        }
        NewsAction::Add(args) => {
            let created = desk.submit_headline(&mut draft_from(args, true)).await?;
            out.ack(&format!("Published #{}", created.id));
            if out.json {
                out.value(&created)?;
            }
            Ok(())
        }
        NewsAction::Draft(args) => {
            let created = desk.submit_draft(&mut draft_from(args, false)).await?;
            out.ack(&format!("Draft #{} awaiting approval", created.id));
            if out.json {
                out.value(&created)?;
            }
            Ok(())
        }
        NewsAction::Toggle { id } => {
            desk.refresh().await?;
            let active = desk.toggle_active(id).await?;
            out.ack(&format!("#{} is now {}", id, if active { "active" } else { "inactive" }));
            Ok(())
        }
        NewsAction::Delete { id } => out.value(&desk.delete(id).await?),
        NewsAction::Approve { id } => out.value(&desk.approve(id).await?),
        NewsAction::Reject { id } => out.value(&desk.reject(id).await?),
        NewsAction::Show { id } => out.value(&desk.show_on_screen(id).await?),
        NewsAction::Fetch { url, source } => out.value(&client.fetch_external(&url, source).await?),
        NewsAction::Import { url, source, index, category } => {
            let fetched = client.fetch_external(&url, source).await?;
            let item = fetched
                .items
                .get(index)
                .ok_or_else(|| anyhow!("fetch returned {} items, no item at {}", fetched.items.len(), index))?;
            let created = desk.import_external(item, &category).await?;
            out.ack(&format!("Imported draft #{}", created.id));
            Ok(())
        }
    }
}

async fn stream(
    action: StreamAction,
    client: &ApiClient,
    settings: &Settings,
    out: Output,
) -> anyhow::Result<()> {
    let preferences = Arc::new(Preferences::load(&settings.console.preferences_path));
    let monitor = Arc::new(StreamMonitor::new(
        client.clone(),
        preferences,
        settings.stream.rtmp_prefix.clone(),
        settings.recheck_delay(),
    ));

    match action {
        StreamAction::Start { target, backup } => {
            let ack = match target {
                Some(target) => {
                    monitor
                        .start(&StreamTarget { target, backup_rtmp_url: backup })
                        .await?
                }
                None => monitor.start_with_saved_key().await?,
            };
            out.value(&ack)?;
            tokio::time::sleep(settings.recheck_delay()).await;
            out.ack(&format!("Stream: {}", monitor.check().await.label()));
            Ok(())
        }
        StreamAction::Stop => {
            out.value(&monitor.stop().await?)?;
            tokio::time::sleep(settings.recheck_delay()).await;
            out.ack(&format!("Stream: {}", monitor.check().await.label()));
            Ok(())
        }
        StreamAction::Status => {
            let status = client.stream_status().await?;
            if out.json {
                out.value(&status)
            } else {
                println!("{}", if status.running { "ON AIR" } else { "OFFLINE" });
                Ok(())
            }
        }
    }
}

async fn overlay(action: OverlayAction, client: &ApiClient, out: Output) -> anyhow::Result<()> {
    let form = OverlayForm::new(client.clone());

    match action {
        OverlayAction::Show => out.value(&client.overlay_data().await?),
        OverlayAction::Set { title, subtitle, info, webview_url, hide } => {
            // The form always sends every field, so start from the server's values
            form.load().await?;
            form.edit(|fields| {
                if let Some(title) = title {
                    fields.title = title;
                }
                if let Some(subtitle) = subtitle {
                    fields.subtitle = subtitle;
                }
                if let Some(info) = info {
                    fields.info = info;
                }
                if let Some(url) = webview_url {
                    fields.webview_url = url;
                }
                if let Some(hide) = hide {
                    fields.hide_overlays = hide;
                }
            })
            .await;
            form.push().await?;
            out.ack("Overlay updated");
            Ok(())
        }
        OverlayAction::Screen { url } => {
            form.set_main_screen(&url).await?;
            out.ack("Main screen updated");
            Ok(())
        }
        OverlayAction::Hide => {
            form.set_hide_overlays(true).await?;
            out.ack("Overlays hidden");
            Ok(())
        }
        OverlayAction::Unhide => {
            form.set_hide_overlays(false).await?;
            out.ack("Overlays visible");
            Ok(())
        }
    }
}

async fn upload(file: &Path, main_screen: bool, client: &ApiClient, out: Output) -> anyhow::Result<()> {
    let media = MediaDesk::new(client.clone());
    let url = media
        .upload(file)
        .await
        .with_context(|| format!("uploading {}", file.display()))?;
    println!("{}", url);

    if main_screen {
        let form = OverlayForm::new(client.clone());
        form.set_main_screen(&url).await?;
        out.ack("Main screen updated");
    }
    Ok(())
}

async fn media(client: &ApiClient, out: Output) -> anyhow::Result<()> {
    let files = client.list_media().await?;
    if out.json {
        return out.value(&files);
    }
    for file in &files {
        println!(
            "{:<32} {}",
            file.name,
            client.endpoints().absolute_media_url(&file.url)
        );
    }
    Ok(())
}

async fn layout(
    action: ConfigAction,
    client: &ApiClient,
    settings: &Settings,
    out: Output,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => out.value(&client.layout_config().await?),
        ConfigAction::Set(args) => {
            client.update_layout_config(&config_update(args)).await?;
            out.ack("Config saved");
            Ok(())
        }
        ConfigAction::Layout => {
            let console = AdminConsole::new(settings.clone())?;
            let mode = console.toggle_layout().await?;
            out.ack(&format!("Layout: {}", mode));
            Ok(())
        }
    }
}

fn config_update(args: ConfigSetArgs) -> ConfigUpdate {
    ConfigUpdate {
        brand_color_primary: args.primary_color,
        brand_color_secondary: args.secondary_color,
        brand_color_dark: args.dark_color,
        logo_url: args.logo_url,
        ticker_speed: args.ticker_speed,
        default_headline: args.default_headline,
        ticker_label: args.ticker_label,
        breaking_label: args.breaking_label,
        live_label: args.live_label,
        layout_mode: args.layout,
        lbar_position: args.lbar_position,
        lbar_width: args.lbar_width,
        lbar_bg_color: args.lbar_bg_color,
        lbar_bg_image: args.lbar_bg_image,
        lbar_content_type: args.lbar_content_type,
        lbar_content_data: args.lbar_content_data,
    }
}

async fn filters(action: FiltersAction, client: &ApiClient, out: Output) -> anyhow::Result<()> {
    match action {
        FiltersAction::Show => {
            let filters = client.filters().await?;
            if out.json {
                out.value(&filters)
            } else {
                println!("{}", join_filter_list(&filters));
                Ok(())
            }
        }
        FiltersAction::Set { list } => {
            let stored = client.set_filters(parse_filter_list(&list)).await?;
            out.ack(&format!("{} filters saved", stored.filters.len()));
            Ok(())
        }
    }
}

async fn feeds(action: FeedsAction, client: &ApiClient, out: Output) -> anyhow::Result<()> {
    match action {
        FeedsAction::List => out.value(&client.list_feeds().await?),
        FeedsAction::Add { name, url, source } => {
            let feed = client.create_feed(&FeedCreate { name, url, source_type: source }).await?;
            out.ack(&format!("Feed #{} added", feed.id));
            Ok(())
        }
        FeedsAction::Delete { id } => out.value(&client.delete_feed(id).await?),
    }
}

async fn ads(action: AdsAction, client: &ApiClient, out: Output) -> anyhow::Result<()> {
    match action {
        AdsAction::Campaigns => out.value(&client.list_campaigns().await?),
        AdsAction::AddCampaign { name, client: sponsor, priority } => {
            let campaign = client
                .create_campaign(&CampaignCreate {
                    name,
                    client: sponsor,
                    priority,
                    start_date: None,
                    end_date: None,
                })
                .await?;
            out.ack(&format!("Campaign #{} created", campaign.id));
            Ok(())
        }
        AdsAction::Items => out.value(&client.list_ad_items().await?),
        AdsAction::AddItem { campaign_id, content, ad_type, duration, interval } => {
            let item = client
                .create_ad_item(&AdItemCreate {
                    campaign_id,
                    ad_type,
                    content,
                    duration,
                    interval,
                    is_active: true,
                })
                .await?;
            out.ack(&format!("Ad item #{} created", item.id));
            Ok(())
        }
        AdsAction::DeleteItem { id } => out.value(&client.delete_ad_item(id).await?),
        AdsAction::Active => out.value(&client.active_ads().await?),
    }
}

async fn programs(action: ProgramsAction, client: &ApiClient, out: Output) -> anyhow::Result<()> {
    match action {
        ProgramsAction::List => out.value(&client.list_programs().await?),
        ProgramsAction::Add { title, video_path, start_time, end_time } => {
            let program = client
                .create_program(&ProgramCreate {
                    title,
                    video_path,
                    start_time,
                    end_time,
                    is_active: true,
                })
                .await?;
            out.ack(&format!("Program #{} scheduled", program.id));
            Ok(())
        }
        ProgramsAction::Delete { id } => out.value(&client.delete_program(id).await?),
    }
}

async fn voting(action: VotingAction, client: &ApiClient, out: Output) -> anyhow::Result<()> {
    match action {
        VotingAction::Config => out.value(&client.voting_config().await?),
        VotingAction::Set { question, options, active } => {
            let config = VotingConfig {
                is_active: active,
                question,
                options,
                ..Default::default()
            };
            out.value(&client.update_voting_config(&config).await?)
        }
        VotingAction::Status => out.value(&client.voting_status().await?),
        VotingAction::Stats => out.value(&client.voting_stats().await?),
    }
}
