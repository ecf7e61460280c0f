//! Connection registry commands: the CLI stand-in for the connect-accounts
//! settings screen. Mutations publish change events on the store bus, so a
//! co-resident aggregator re-syncs immediately; a separate server process
//! picks the new registry up on its next refresh.

use socialleaf_core::{AppConfig, ConnectionStatus, Platform};
use socialleaf_store::ConnectionStore;

pub fn list(config: &AppConfig) -> anyhow::Result<()> {
    let store = ConnectionStore::new(&config.data_dir);
    let map = store.load();

    for platform in Platform::ALL {
        match map.status(platform) {
            Some(status) if status.connected => {
                let handle = status.public_handle.as_deref().unwrap_or("-");
                let data_type = status.data_type.as_deref().unwrap_or("-");
                println!("{platform:<10} connected    {handle:<20} {data_type}");
            }
            _ => println!("{platform:<10} not connected"),
        }
    }
    Ok(())
}

pub fn connect(
    config: &AppConfig,
    platform: &str,
    handle: &str,
    channel_id: Option<&str>,
) -> anyhow::Result<()> {
    let platform: Platform = platform.parse()?;
    let store = ConnectionStore::new(&config.data_dir);

    let data_type = if platform.has_first_party_api() {
        "Live"
    } else {
        "Simulated"
    };
    store.set(
        platform,
        ConnectionStatus {
            connected: true,
            public_handle: Some(handle.to_owned()),
            channel_id: channel_id.map(str::to_owned),
            data_type: Some(data_type.to_owned()),
        },
    )?;

    println!("connected {platform} as {handle} ({data_type})");
    Ok(())
}

pub fn disconnect(config: &AppConfig, platform: &str) -> anyhow::Result<()> {
    let platform: Platform = platform.parse()?;
    let store = ConnectionStore::new(&config.data_dir);
    store.remove(platform)?;
    println!("disconnected {platform}");
    Ok(())
}
