/// 事件分发器示例
/// 展示同步回调、具名监听器、失败隔离与异步事件流
use anyhow::{Result as AnyResult, bail};
use ddd_core::domain_event::DomainEvent;
use ddd_core::eventing::{EventDispatcher, EventListener};
use futures_util::StreamExt;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum AccountEvent {
    Opened { id: String },
    Deposited { id: String, amount: u64 },
}

impl DomainEvent for AccountEvent {
    fn event_type(&self) -> &str {
        match self {
            AccountEvent::Opened { .. } => "AccountEvent.Opened",
            AccountEvent::Deposited { .. } => "AccountEvent.Deposited",
        }
    }
}

struct Auditor;

impl EventListener<AccountEvent> for Auditor {
    fn listener_name(&self) -> &str {
        "auditor"
    }

    fn on_event(&self, event: &AccountEvent) -> AnyResult<()> {
        if let AccountEvent::Deposited { id, amount } = event {
            if *amount > 1_000 {
                bail!("deposit of {amount} to {id} needs manual review");
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let dispatcher = EventDispatcher::<AccountEvent>::new();

    dispatcher.subscribe(|event| {
        println!("[log] {}", event.event_type());
        Ok(())
    })?;
    dispatcher.subscribe_listener(Arc::new(Auditor))?;

    let mut failures = dispatcher.listener_failures()?;
    let mut stream = dispatcher.subscribe_stream()?;
    let projector = tokio::spawn(async move {
        let mut balance = 0;
        while let Some(Ok(event)) = stream.next().await {
            match event {
                AccountEvent::Opened { id } => println!("[projector] opened {id}"),
                AccountEvent::Deposited { amount, .. } => balance += amount,
            }
        }
        balance
    });

    dispatcher.publish(AccountEvent::Opened { id: "acc-1".into() })?;
    dispatcher.publish(AccountEvent::Deposited {
        id: "acc-1".into(),
        amount: 200,
    })?;
    let report = dispatcher.publish(AccountEvent::Deposited {
        id: "acc-1".into(),
        amount: 5_000,
    })?;
    println!("last publish: {report:?}");

    dispatcher.close();

    while let Some(failure) = failures.next().await {
        println!("[failure] {failure}");
    }
    println!("projected balance: {}", projector.await?);
    Ok(())
}
