use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use deeptravel_application::{
    AttachmentPipeline, ChatSender, StubAssistant, check_chat_preconditions,
};
use deeptravel_core::attachment::GeoFix;
use deeptravel_core::chat::{Category, Message};
use deeptravel_core::navigation::Screen;
use deeptravel_infrastructure::{FileImageSource, FixedLocationProvider};
use std::path::PathBuf;
use std::sync::Arc;

use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message, optionally with images and a position
    Send {
        category: Category,
        text: Option<String>,
        /// Image picked from the library (repeatable)
        #[arg(long = "image", conflicts_with = "photo")]
        images: Vec<PathBuf>,
        /// Image taken with the camera
        #[arg(long)]
        photo: Option<PathBuf>,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Show the history of a category
    History {
        category: Category,
        /// Only show messages containing this text
        #[arg(long)]
        search: Option<String>,
    },
}

pub async fn run(app: &AppContext, action: ChatAction) -> Result<()> {
    match action {
        ChatAction::Send {
            category,
            text,
            images,
            photo,
            lat,
            lon,
        } => {
            let fix = lat.zip(lon).map(|(latitude, longitude)| GeoFix {
                latitude,
                longitude,
                accuracy: None,
            });
            send(app, category, text.unwrap_or_default(), images, photo, fix).await
        }
        ChatAction::History { category, search } => {
            history(app, category, search.as_deref()).await;
            Ok(())
        }
    }
}

/// Prints the precondition prompt, if any. Returns `false` when chatting
/// should not continue.
fn preconditions_met(app: &AppContext) -> bool {
    match check_chat_preconditions(&app.settings.snapshot(), &app.journeys.snapshot()) {
        Some(precondition) => {
            println!("{}", precondition.message().yellow());
            println!(
                "{}",
                format!("Go to {} to fix this.", precondition.remedy()).bright_black()
            );
            false
        }
        None => true,
    }
}

async fn send(
    app: &AppContext,
    category: Category,
    text: String,
    images: Vec<PathBuf>,
    photo: Option<PathBuf>,
    fix: Option<GeoFix>,
) -> Result<()> {
    if !preconditions_met(app) {
        return Ok(());
    }

    let session = app.open_chat(category).await;
    app.navigation.record_visit(Screen::from(category)).await;

    let has_photo = photo.is_some();
    let pipeline = AttachmentPipeline::new(
        Arc::new(FileImageSource::new(photo, images.clone())),
        Arc::new(app.image_processor()),
        app.config.attachments.max_selection,
    );
    let attached = if has_photo {
        pipeline.capture(&session).await
    } else if !images.is_empty() {
        pipeline.pick(&session).await
    } else {
        Ok(0)
    };
    match attached {
        Ok(count) if count > 0 => {
            println!("{}", format!("Attached {} image(s)", count).bright_black());
        }
        Ok(_) => {}
        Err(e) if e.is_permission_denied() => {
            eprintln!("{}", format!("{}", e).red());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    session.set_draft(&text);

    let sender = ChatSender::new(
        Arc::new(FixedLocationProvider::new(fix)),
        Arc::new(StubAssistant),
    );
    let model = app.settings.settings().model;

    match sender.send(&session, &model).await {
        Some(outcome) => {
            print_message(&outcome.user_message);
            if let Some(reply) = &outcome.reply {
                print_message(reply);
            } else {
                eprintln!("{}", "The assistant did not answer.".red());
            }
        }
        None => println!("{}", category.placeholder().yellow()),
    }
    Ok(())
}

async fn history(app: &AppContext, category: Category, search: Option<&str>) {
    if !preconditions_met(app) {
        return;
    }

    let session = app.open_chat(category).await;
    app.navigation.record_visit(Screen::from(category)).await;

    let messages = session.search(search.unwrap_or_default());
    println!("{}", category.title().bright_magenta().bold());
    if messages.is_empty() {
        println!("{}", "No messages.".bright_black());
    }
    for message in &messages {
        print_message(message);
    }
}

fn print_message(message: &Message) {
    if message.is_user() {
        println!("{}", format!("> {}", message.content).green());
        if let Some(uris) = &message.image_uris {
            for uri in uris {
                println!("  {}", uri.bright_black());
            }
        }
    } else {
        println!("{}", message.content.bright_blue());
    }
    println!();
}
