//! Settings: dark mode, font size, audio previews, and the desktop
//! background image (persisted as a `data:` URI).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;

use crate::dock::registry::ToolDescriptor;
use crate::storage::{
    AUDIO_PREVIEW_KEY, BACKGROUND_KEY, DARK_MODE_KEY, DEFAULT_FONT_SIZE, FONT_SIZE_KEY, Storage,
};
use crate::ui::panel::{ToolContext, ToolView};

pub const TOOL_ID: &str = "settings";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(TOOL_ID, "Settings", || Ok(Box::new(SettingsView))).with_icon("⚙")
}

// ── Settings state ─────────────────────────────────────────────────────────────

/// In-memory settings, loaded once and written back key-by-key on change.
pub struct Settings {
    pub dark_mode: bool,
    pub font_size: u32,
    pub audio_preview: bool,
    /// Background image as a `data:` URI, if one is set.
    pub background: Option<String>,
    /// Bumped whenever `background` changes, so the renderer can re-cache
    /// the decoded image under a fresh URI.
    pub background_revision: u64,
}

impl Settings {
    pub fn load(storage: &Storage) -> Self {
        Self {
            dark_mode: read_flag(storage, DARK_MODE_KEY),
            font_size: read_font_size(storage),
            audio_preview: read_flag(storage, AUDIO_PREVIEW_KEY),
            background: storage.get::<String>(BACKGROUND_KEY),
            background_revision: 0,
        }
    }
}

/// Read `novaFontSize`, accepting either a JSON number or the stringified
/// form older storage files carry (`"16"`). Anything else is the default.
pub fn read_font_size(storage: &Storage) -> u32 {
    if let Some(size) = storage.get::<u32>(FONT_SIZE_KEY) {
        return size;
    }
    storage
        .get::<String>(FONT_SIZE_KEY)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FONT_SIZE)
}

/// Read a boolean flag, accepting either a JSON bool or `"true"`/`"false"`
/// strings. Missing or corrupt values are `false`.
pub fn read_flag(storage: &Storage, key: &str) -> bool {
    if let Some(flag) = storage.get::<bool>(key) {
        return flag;
    }
    storage
        .get::<String>(key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(false)
}

// ── Data URI codec ─────────────────────────────────────────────────────────────

/// Encode raw image bytes as a `data:` URI, sniffing the MIME type from the
/// image magic bytes.
pub fn encode_data_uri(bytes: &[u8]) -> String {
    let mime = match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::WebP) => "image/webp",
        _ => "application/octet-stream",
    };
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Decode a base64 `data:` URI back into raw bytes. `None` on any shape or
/// decode failure.
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    BASE64.decode(payload).ok()
}

// ── Panel view ─────────────────────────────────────────────────────────────────

pub struct SettingsView;

impl SettingsView {
    fn pick_background(&self, ctx: &mut ToolContext<'_>) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
            .pick_file()
        else {
            return;
        };
        match std::fs::read(&path) {
            Ok(bytes) => {
                let uri = encode_data_uri(&bytes);
                ctx.storage.set(BACKGROUND_KEY, &uri);
                ctx.settings.background = Some(uri);
                ctx.settings.background_revision += 1;
            }
            Err(e) => log::warn!("could not read background image {}: {e}", path.display()),
        }
    }
}

impl ToolView for SettingsView {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolContext<'_>) {
        if ui
            .checkbox(&mut ctx.settings.dark_mode, "Dark Mode")
            .changed()
        {
            ctx.storage.set(DARK_MODE_KEY, &ctx.settings.dark_mode);
        }

        ui.horizontal(|ui| {
            ui.label("Font Size:");
            if ui
                .add(egui::DragValue::new(&mut ctx.settings.font_size).range(10..=48))
                .changed()
            {
                ctx.storage.set(FONT_SIZE_KEY, &ctx.settings.font_size);
            }
        });

        if ui
            .checkbox(&mut ctx.settings.audio_preview, "Audio Previews")
            .changed()
        {
            ctx.storage.set(AUDIO_PREVIEW_KEY, &ctx.settings.audio_preview);
            log::info!("audio previews: {}", ctx.settings.audio_preview);
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Background Image…").clicked() {
                self.pick_background(ctx);
            }
            if ui.button("Classic Blue").clicked() {
                ctx.storage.remove(BACKGROUND_KEY);
                ctx.settings.background = None;
                ctx.settings.background_revision += 1;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn defaults_when_storage_is_empty() {
        let storage = Storage::in_memory();
        let settings = Settings::load(&storage);
        assert!(!settings.dark_mode);
        assert_eq!(settings.font_size, 16);
        assert!(!settings.audio_preview);
        assert_eq!(settings.background, None);
    }

    #[test]
    fn font_size_accepts_stringified_numbers() {
        let mut storage = Storage::in_memory();
        storage.set(FONT_SIZE_KEY, &"16");
        assert_eq!(read_font_size(&storage), 16);

        storage.set(FONT_SIZE_KEY, &22u32);
        assert_eq!(read_font_size(&storage), 22);
    }

    #[test]
    fn corrupt_font_size_falls_back_to_default() {
        let mut storage = Storage::in_memory();
        storage.set(FONT_SIZE_KEY, &"huge");
        assert_eq!(read_font_size(&storage), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn flags_accept_bool_and_string_forms() {
        let mut storage = Storage::in_memory();
        storage.set(DARK_MODE_KEY, &true);
        assert!(read_flag(&storage, DARK_MODE_KEY));

        storage.set(DARK_MODE_KEY, &"true");
        assert!(read_flag(&storage, DARK_MODE_KEY));

        storage.set(DARK_MODE_KEY, &"maybe");
        assert!(!read_flag(&storage, DARK_MODE_KEY));
    }

    #[test]
    fn data_uri_round_trips() {
        let uri = encode_data_uri(PNG_MAGIC);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_uri(&uri).unwrap(), PNG_MAGIC);
    }

    #[test]
    fn decode_rejects_non_base64_uris() {
        assert_eq!(decode_data_uri("data:image/png,plain"), None);
        assert_eq!(decode_data_uri("http://example.com/a.png"), None);
        assert_eq!(decode_data_uri("data:image/png;base64,@@@"), None);
    }

    #[test]
    fn unknown_bytes_encode_as_octet_stream() {
        let uri = encode_data_uri(b"not an image");
        assert!(uri.starts_with("data:application/octet-stream;base64,"));
    }
}
