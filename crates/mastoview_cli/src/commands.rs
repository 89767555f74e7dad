//! Subcommand handlers.

use crate::Command;
use mastoview_core::{
    fix_outbox_file, served_url, ArchiveRepository, DirArchiveRepository, FixReport, OrderedItem,
    PostService, Status, ViewerConfig, Visibility, VisibilityPolicy,
};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// CLI-level lookup failures.
#[derive(Debug)]
pub enum CliError {
    PostNotFound(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostNotFound(id) => write!(f, "post not found or not visible: {id}"),
        }
    }
}

impl Error for CliError {}

pub(crate) fn run(archive_dir: &Path, command: Command) -> Result<(), Box<dyn Error>> {
    let repo = DirArchiveRepository::new(archive_dir);
    match command {
        Command::FixAttachments => fix_attachments(&repo),
        Command::Posts { json } => {
            let (service, _) = open_service(&repo)?;
            print_posts(&service, json)
        }
        Command::Thread { post_id, json } => {
            let (service, _) = open_service(&repo)?;
            print_thread(&service, &post_id, json)
        }
        Command::Profile => {
            let (service, _) = open_service(&repo)?;
            println!("{}", serde_json::to_string_pretty(&service.profile())?);
            Ok(())
        }
        Command::Media { json } => {
            let (service, config) = open_service(&repo)?;
            print_media(&service, &config, json)
        }
    }
}

fn open_service(
    repo: &DirArchiveRepository,
) -> Result<(PostService, ViewerConfig), Box<dyn Error>> {
    let config = ViewerConfig::from_env()?;
    let archive = repo.load_archive()?;
    let policy = VisibilityPolicy::new(config.include_private_posts);
    Ok((PostService::new(archive, policy), config))
}

fn fix_attachments(repo: &DirArchiveRepository) -> Result<(), Box<dyn Error>> {
    let report = fix_outbox_file(&repo.outbox_path())?;
    for line in fix_report_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

/// Change lines in document order, then the summary line.
fn fix_report_lines(report: &FixReport) -> Vec<String> {
    let mut lines = report
        .changes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    lines.push(format!(
        "Normalized {} attachment URLs",
        report.normalized_count()
    ));
    lines
}

fn print_posts(service: &PostService, as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        let rows = service.posts().iter().map(post_row).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for item in service.posts() {
        let published = item.activity().published.as_deref().unwrap_or("-");
        match item {
            OrderedItem::Status(status) => println!(
                "{}\t{}\t{}\t{} attachments",
                status.post_id(),
                Visibility::of(&status.object).as_str(),
                published,
                status.object.attachment.len()
            ),
            OrderedItem::Boost(boost) => println!("boost\t{}\t{}", boost.object, published),
        }
    }
    Ok(())
}

fn print_thread(
    service: &PostService,
    post_id: &str,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let post = service
        .post_by_id(post_id)
        .ok_or_else(|| CliError::PostNotFound(post_id.to_string()))?;
    let chain = service.previous_posts(post);

    if as_json {
        let rows = chain.iter().map(|status| status_row(status)).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for line in thread_lines(&chain) {
        println!("{line}");
    }
    Ok(())
}

/// One line per post, indented two spaces per reply depth.
fn thread_lines(chain: &[&Status]) -> Vec<String> {
    chain
        .iter()
        .enumerate()
        .map(|(depth, status)| {
            format!(
                "{}{}\t{}",
                "  ".repeat(depth),
                status.post_id(),
                status.object.published.as_deref().unwrap_or("-")
            )
        })
        .collect()
}

fn print_media(
    service: &PostService,
    config: &ViewerConfig,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let rows = service
        .statuses()
        .flat_map(|status| {
            status.object.attachment.iter().map(move |attachment| {
                (
                    status.post_id(),
                    attachment.media_kind(),
                    served_url(attachment, &config.base_path),
                )
            })
        })
        .collect::<Vec<_>>();

    if as_json {
        let values = rows
            .iter()
            .map(|(post_id, kind, url)| json!({ "postId": post_id, "kind": kind, "url": url }))
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    for (post_id, kind, url) in rows {
        println!("{post_id}\t{}\t{url}", kind.as_str());
    }
    Ok(())
}

fn post_row(item: &OrderedItem) -> serde_json::Value {
    match item {
        OrderedItem::Status(status) => status_row(status),
        OrderedItem::Boost(boost) => json!({
            "kind": "boost",
            "id": boost.activity.id,
            "object": boost.object,
            "published": boost.activity.published,
        }),
    }
}

fn status_row(status: &Status) -> serde_json::Value {
    json!({
        "kind": "status",
        "postId": status.post_id(),
        "id": status.object.id,
        "visibility": Visibility::of(&status.object),
        "published": status.object.published,
        "inReplyTo": status.object.in_reply_to,
        "content": status.object.content,
        "attachments": status.object.attachment.len(),
    })
}
