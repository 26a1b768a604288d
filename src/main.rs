use confdevice::config::Config;
use confdevice::domain::conference::{
    CallSession, ConferenceCore, ConferenceSubscription, MediaDirection, MediaKind,
    MembershipState, Participant, ParticipantDevice,
};
use confdevice::domain::shared::value_objects::{IdentityAddress, SessionId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .init();

    info!("Configuration loaded: {:?}", config);

    demo_device_lifecycle(&config)?;

    Ok(())
}

/// Participant with no core attached
struct DemoParticipant {
    address: IdentityAddress,
}

impl Participant for DemoParticipant {
    fn address(&self) -> IdentityAddress {
        self.address.clone()
    }

    fn core(&self) -> Option<Arc<dyn ConferenceCore>> {
        None
    }
}

/// Session that negotiated audio only
struct DemoSession {
    id: SessionId,
}

impl CallSession for DemoSession {
    fn id(&self) -> SessionId {
        self.id
    }

    fn negotiated_direction(&self, kind: MediaKind) -> Option<MediaDirection> {
        match kind {
            MediaKind::Audio => Some(MediaDirection::SendRecv),
            _ => None,
        }
    }
}

fn demo_device_lifecycle(config: &Config) -> anyhow::Result<()> {
    info!("=== Participant Device Demo ===");

    let participant: Arc<dyn Participant> = Arc::new(DemoParticipant {
        address: IdentityAddress::parse("sip:alice@example.com")?,
    });
    let gruu = IdentityAddress::parse("sip:alice@example.com;gr=xyz")?;

    let mut device = ParticipantDevice::with_media(
        Arc::downgrade(&participant),
        gruu.clone(),
        "Alice's phone",
        config.devices.media_capabilities(),
    );
    info!("Device created: {} ({})", device.address(), device.state());

    device.set_session(Some(Arc::new(DemoSession { id: SessionId::new() })));
    device.set_state(MembershipState::Present);
    info!("Joined at {:?}", device.time_of_joining());

    if device.update_media() {
        info!(
            "Media updated: audio={} video={} text={}",
            device.audio_direction(),
            device.video_direction(),
            device.text_direction()
        );
    }

    let subscription = Arc::new(ConferenceSubscription::new(gruu, "demo-dialog".to_string(), 3600));
    device.set_subscription_event(Some(subscription));
    info!("Subscribed: {}, security level: {}", device.is_subscribed(), device.security_level());

    info!("Snapshot: {}", device.snapshot().to_json()?);

    device.set_state(MembershipState::ScheduledForLeaving);
    device.set_state(MembershipState::Leaving);
    device.set_state(MembershipState::Left);
    device.set_subscription_event(None);
    device.set_session(None);

    info!("=== Participant Device Demo Complete ===");
    Ok(())
}
