//! Font atlas texture management

use super::device::{DeviceError, DeviceResult, GraphicsDevice, TextureHandle, TextureUpload};
use crate::config::TextureFilter;
use crate::gui::{GuiContext, TextureId};

/// GPU copy of the GUI font atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontTexture {
    /// Device texture
    pub handle: TextureHandle,
    /// Atlas width in pixels
    pub width: u32,
    /// Atlas height in pixels
    pub height: u32,
}

impl FontTexture {
    /// Rasterize the GUI font atlas, upload it and register it with the GUI
    ///
    /// The texture binding of the selected unit is restored before returning.
    ///
    /// # Arguments
    ///
    /// * `device` - Device to upload to
    /// * `gui` - GUI context providing the atlas and receiving its texture id
    /// * `filter` - Minification and magnification filter
    pub fn create<G: GuiContext + ?Sized>(
        device: &mut dyn GraphicsDevice,
        gui: &mut G,
        filter: TextureFilter,
    ) -> DeviceResult<Self> {
        let image = gui.font_texture_data();
        if !image.is_consistent() {
            return Err(DeviceError::InvalidArgument(format!(
                "font atlas pixel data does not match {}x{}",
                image.width, image.height
            )));
        }
        let rgba = image.to_rgba32();

        let last_texture = device.bound_texture();
        let created = device.create_texture(&TextureUpload {
            width: image.width,
            height: image.height,
            filter,
            rgba: &rgba,
        });
        device.bind_texture(last_texture);
        let handle = created?;

        gui.io_mut().font_texture_id = texture_id(handle);
        log::info!("Font atlas uploaded: {}x{} as {:?}", image.width, image.height, handle);

        Ok(Self {
            handle,
            width: image.width,
            height: image.height,
        })
    }

    /// Delete the texture and clear the GUI's reference to it
    pub fn destroy<G: GuiContext + ?Sized>(self, device: &mut dyn GraphicsDevice, gui: &mut G) {
        device.delete_texture(self.handle);
        gui.io_mut().font_texture_id = TextureId::NONE;
    }
}

/// Opaque GUI id for a device texture
pub fn texture_id(handle: TextureHandle) -> TextureId {
    TextureId(u64::from(handle.0))
}

/// Device texture for an opaque GUI id
///
/// Ids that cannot name a device texture map to the unbound texture.
pub fn texture_handle(id: TextureId) -> TextureHandle {
    u32::try_from(id.0).map_or(TextureHandle::NONE, TextureHandle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use crate::gui::{FontImage, FontPixels};
    use crate::testing::{DeviceCall, RecordingDevice, ScriptedGui};

    #[test]
    fn test_font_upload_end_to_end() {
        let mut device = RecordingDevice::new();
        let mut gui = ScriptedGui::new();

        let filter = BridgeConfig::default().font_filter;
        let font = FontTexture::create(&mut device, &mut gui, filter).unwrap();

        let creations: Vec<DeviceCall> = device
            .calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, DeviceCall::CreateTexture { .. }))
            .cloned()
            .collect();
        assert_eq!(
            creations,
            vec![DeviceCall::CreateTexture {
                width: 2,
                height: 2,
                filter: TextureFilter::Linear,
            }]
        );
        assert!(font.handle.is_some());
        assert_eq!(gui.io.font_texture_id, texture_id(font.handle));
        assert!(gui.io.font_texture_id.is_some());
        assert_eq!(gui.font_requests, 1);

        // Alpha atlas arrives as white texels carrying coverage
        let record = &device.textures[&font.handle];
        assert_eq!(record.rgba.len(), 16);
        assert_eq!(&record.rgba[4..8], &[0xFF, 0xFF, 0xFF, 0x40]);
    }

    #[test]
    fn test_create_restores_texture_binding() {
        let mut device = RecordingDevice::new();
        device.state.texture_units[0] = TextureHandle(77);
        let mut gui = ScriptedGui::new();

        FontTexture::create(&mut device, &mut gui, TextureFilter::Nearest).unwrap();

        assert_eq!(device.state.texture_units[0], TextureHandle(77));
    }

    #[test]
    fn test_upload_uses_requested_filter() {
        let mut device = RecordingDevice::new();
        let mut gui = ScriptedGui::new();

        let font = FontTexture::create(&mut device, &mut gui, TextureFilter::Nearest).unwrap();

        assert_eq!(device.textures[&font.handle].filter, TextureFilter::Nearest);
    }

    #[test]
    fn test_inconsistent_atlas_is_rejected() {
        let mut device = RecordingDevice::new();
        let mut gui = ScriptedGui::new();
        gui.font = FontImage {
            width: 4,
            height: 4,
            pixels: FontPixels::Alpha8(vec![0; 3]),
        };

        let result = FontTexture::create(&mut device, &mut gui, TextureFilter::Linear);

        assert!(matches!(result, Err(DeviceError::InvalidArgument(_))));
        assert!(device.textures.is_empty());
        assert_eq!(gui.io.font_texture_id, TextureId::NONE);
    }

    #[test]
    fn test_destroy_clears_reference() {
        let mut device = RecordingDevice::new();
        let mut gui = ScriptedGui::new();
        let font = FontTexture::create(&mut device, &mut gui, TextureFilter::Linear).unwrap();

        font.destroy(&mut device, &mut gui);

        assert!(device.textures.is_empty());
        assert_eq!(gui.io.font_texture_id, TextureId::NONE);
    }

    #[test]
    fn test_id_round_trip() {
        assert_eq!(texture_handle(texture_id(TextureHandle(12))), TextureHandle(12));
        assert_eq!(texture_handle(TextureId(u64::MAX)), TextureHandle::NONE);
    }
}
