//! Audio setup and the shared session.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use std::sync::{Arc, Mutex};

use facade_mix::{
    config::MixConfig,
    mixer::OutputGate,
    session::FacadeSession,
    tap::{level_tap, LevelTap},
    MAX_BLOCK_SIZE,
};

use super::gate::{DeviceGate, DeviceStatus};
use super::ui::UiApp;

pub type SharedSession = Arc<Mutex<FacadeSession<DeviceGate>>>;

/// Open the default output, start the session and hand the terminal to the
/// UI until the user quits.
pub fn run(config: MixConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0 as f32;
    let channels = stream_config.channels() as usize;
    log::info!("output: {sample_rate} Hz, {channels} channels");

    let status = DeviceStatus::default();
    let session = FacadeSession::new(config.with_sample_rate(sample_rate), DeviceGate::new(status.clone()))?;
    let session: SharedSession = Arc::new(Mutex::new(session));

    let (mut tap, levels) = level_tap();
    let audio_session = Arc::clone(&session);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &stream_config.into(),
        move |data: &mut [f32], _| {
            render_interleaved(&audio_session, &mut tap, &mut render_buf, data, channels);
        },
        move |err| {
            log::error!("audio stream error: {err}");
            status.mark_lost();
        },
        None,
    )?;
    stream.play()?;

    lock(&session)?.start();

    let mut terminal = ratatui::init();
    let result = UiApp::new(Arc::clone(&session), levels).run(&mut terminal);
    ratatui::restore();

    lock(&session)?.shutdown();
    drop(stream);
    result
}

pub fn lock(session: &SharedSession) -> EyreResult<std::sync::MutexGuard<'_, FacadeSession<DeviceGate>>> {
    session.lock().map_err(|_| eyre!("audio thread panicked while holding the session"))
}

/// Fill one interleaved device buffer from the session.
///
/// Never waits on the lock: while the UI thread holds it (a rebuild after a
/// click, say) the callback writes silence for this buffer.
fn render_interleaved<G: OutputGate>(
    session: &Mutex<FacadeSession<G>>,
    tap: &mut LevelTap,
    render_buf: &mut [f32],
    data: &mut [f32],
    channels: usize,
) {
    let mut session = match session.try_lock() {
        Ok(session) => session,
        Err(_) => {
            data.fill(0.0);
            return;
        }
    };

    let total_frames = data.len() / channels;
    let mut frames_written = 0;
    while frames_written < total_frames {
        let frames = (total_frames - frames_written).min(render_buf.len());
        let block = &mut render_buf[..frames];
        session.render(block);
        tap.push_block(block);

        // mono to all channels
        let out_off = frames_written * channels;
        for (i, &s) in block.iter().enumerate() {
            for ch in 0..channels {
                data[out_off + i * channels + ch] = s;
            }
        }

        frames_written += frames;
    }
}
