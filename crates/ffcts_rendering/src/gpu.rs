//! # Window Presentation
//!
//! Copies a finished [`PixelSurface`] into a `wgpu` window surface with a
//! single texture write per frame. No shaders, no pipelines: the surface
//! texture has to accept copies and use an 8-bit RGBA or BGRA layout, and
//! anything else is reported as [`RenderError::CapabilityUnavailable`].

use tracing::{info, warn};

use crate::error::{RenderError, RenderResult};
use crate::surface::PixelSurface;

/// Surface formats the frame buffer can be copied into, best first.
const SUPPORTED: [wgpu::TextureFormat; 4] = [
    wgpu::TextureFormat::Rgba8Unorm,
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8UnormSrgb,
    wgpu::TextureFormat::Bgra8UnormSrgb,
];

/// Picks the first offered format the frame buffer maps onto.
#[must_use]
pub fn pick_format(offered: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    SUPPORTED.iter().copied().find(|f| offered.contains(f))
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

/// Owns the GPU side of a window.
pub struct SurfacePresenter<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    staging: Vec<u8>,
}

impl<'w> SurfacePresenter<'w> {
    /// Acquires an adapter, device and surface for `target`.
    ///
    /// Every failure on the way maps to
    /// [`RenderError::CapabilityUnavailable`].
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
    ) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::CapabilityUnavailable(format!("surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| RenderError::CapabilityUnavailable("no compatible adapter".to_string()))?;

        info!(adapter = %adapter.get_info().name, "graphics adapter selected");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("ffcts"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
            },
            None,
        ))
        .map_err(|e| RenderError::CapabilityUnavailable(format!("device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(RenderError::CapabilityUnavailable(
                "surface textures cannot be written to".to_string(),
            ));
        }
        let format = pick_format(&caps.formats).ok_or_else(|| {
            RenderError::CapabilityUnavailable(format!("no 8-bit RGBA surface format in {:?}", caps.formats))
        })?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            staging: Vec::new(),
        })
    }

    /// Texture format in use.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Reconfigures the swap chain for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Uploads `frame` and presents it.
    ///
    /// A frame whose size does not match the swap chain (a resize is in
    /// flight) or a lost surface is skipped, not treated as an error.
    pub fn present(&mut self, frame: &PixelSurface) -> RenderResult<()> {
        if frame.width() != self.config.width || frame.height() != self.config.height {
            return Ok(());
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(RenderError::Present(e.to_string())),
        };

        let data = if is_bgra(self.config.format) {
            self.staging.clear();
            self.staging.extend(frame.pixels().iter().flat_map(|&[r, g, b, a]| [b, g, r, a]));
            &self.staging[..]
        } else {
            frame.as_bytes()
        };

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &output.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * frame.width()),
                rows_per_image: Some(frame.height()),
            },
            wgpu::Extent3d {
                width: frame.width(),
                height: frame.height(),
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::empty());
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_linear_rgba() {
        let offered = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8Unorm,
        ];
        assert_eq!(pick_format(&offered), Some(wgpu::TextureFormat::Rgba8Unorm));
    }

    #[test]
    fn test_rejects_float_formats() {
        let offered = [wgpu::TextureFormat::Rgba16Float, wgpu::TextureFormat::Rgb10a2Unorm];
        assert_eq!(pick_format(&offered), None);
    }

    #[test]
    fn test_bgra_detection() {
        assert!(is_bgra(wgpu::TextureFormat::Bgra8Unorm));
        assert!(!is_bgra(wgpu::TextureFormat::Rgba8UnormSrgb));
    }
}
