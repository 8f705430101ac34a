//! Discord gateway: feeds channel messages to the dispatcher and sends replies.

use std::sync::Arc;

use serenity::all::{Client, Context, EventHandler, GatewayIntents, Message, Ready};
use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use tracing::{debug, info, warn};

use crate::bot::dispatcher::{Dispatcher, Inbound};
use crate::config::Config;
use crate::error::Result;
use crate::phishin::PhishinClient;
use crate::phishnet::PhishnetClient;
use crate::render::{EMBED_COLOR, Reply};

/// Discord's maximum message content length in characters.
const MAX_CONTENT_LEN: usize = 2000;
const MAX_EMBED_TITLE_LEN: usize = 256;
const MAX_EMBED_DESCRIPTION_LEN: usize = 4096;

pub type PhishDispatcher = Dispatcher<PhishinClient, PhishnetClient>;

pub struct Handler {
    dispatcher: Arc<PhishDispatcher>,
}

impl Handler {
    pub fn new(dispatcher: Arc<PhishDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        let bot_user_id = ctx.cache.current_user().id.get();
        let inbound = Inbound {
            channel_id: msg.channel_id.get(),
            author_id: msg.author.id.get(),
            content: msg.content.clone(),
        };

        let reply = match self.dispatcher.handle(bot_user_id, &inbound).await {
            Ok(Some(reply)) => reply,
            Ok(None) => return,
            Err(e) if e.is_user_facing() => {
                debug!("Dropping command {:?}: {}", inbound.content, e);
                return;
            }
            Err(e) => {
                warn!("Command {:?} failed: {}", inbound.content, e);
                return;
            }
        };

        if let Err(e) = msg.channel_id.send_message(&ctx.http, build_message(&reply)).await {
            warn!("Failed to send reply to channel {}: {}", inbound.channel_id, e);
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected to Discord as {}", ready.user.name);
    }
}

/// Connect to Discord and answer commands until Ctrl-C.
pub async fn run_bot(config: &Config) -> Result<()> {
    let phishin = PhishinClient::new(&config.phishin_token, config.request_timeout)?;
    let phishnet = PhishnetClient::new(&config.phishnet_token, config.request_timeout)?;
    let dispatcher = Arc::new(Dispatcher::new(phishin, phishnet, config));

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(dispatcher))
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Using {} time zone", config.clock);
    client.start().await?;

    Ok(())
}

fn build_message(reply: &Reply) -> CreateMessage {
    match reply {
        Reply::Embed(embed) => {
            let mut builder = CreateEmbed::new()
                .title(truncate(&embed.title, MAX_EMBED_TITLE_LEN))
                .description(truncate(&embed.description, MAX_EMBED_DESCRIPTION_LEN))
                .color(EMBED_COLOR);
            if let Some(footer) = &embed.footer {
                builder = builder.footer(CreateEmbedFooter::new(footer));
            }
            CreateMessage::new().embed(builder)
        }
        Reply::Text(text) => CreateMessage::new().content(truncate(text, MAX_CONTENT_LEN)),
    }
}

/// Cut `s` down to at most `max` characters.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
