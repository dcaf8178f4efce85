use crate::settings::DemoSettings;
use arc_input::Command;
use async_stream::stream;
use futures::Stream;
use log::debug;
use tokio::time::{self, MissedTickBehavior};

/// Progress updates taken from `demo.steps`, one per `demo.interval`.
pub fn demo(settings: &DemoSettings) -> impl Stream<Item = Command> {
    let DemoSettings {
        steps,
        interval,
        animated,
        repeat,
    } = settings.clone();

    stream! {
        if steps.is_empty() {
            return;
        }

        let mut interval = time::interval(interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes right away.
        interval.tick().await;

        loop {
            for &value in &steps {
                interval.tick().await;
                debug!("Scripted progress: {}", value);
                yield Command::SetProgress { value, animated };
            }
            if !repeat {
                break;
            }
        }
    }
}
