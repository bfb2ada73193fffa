//! Bloom post-processing: pass planning, runtime settings and the GPU targets
//! and pipelines that run the plan.
use std::collections::HashMap;

use crate::view::render::{create_depth_texture, SCENE_COLOR_FORMAT};

pub const MAX_PASSES: u32 = 10;
pub const MIN_DOWNSCALE: f32 = 1.0;
pub const MAX_DOWNSCALE: f32 = 8.0;
pub const THRESHOLD_STEP: f32 = 0.05;
pub const DOWNSCALE_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    pub enabled: bool,
    /// Bright and blur buffers are `size / downscale`.
    pub downscale: f32,
    /// Luminance above which a pixel feeds the bloom.
    pub threshold: f32,
    /// Horizontal + vertical blur pairs.
    pub passes: u32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self { enabled: true, downscale: 2.0, threshold: 0.01, passes: 0 }
    }
}

impl BloomSettings {
    pub fn adjust_passes(&mut self, delta: i32) {
        self.passes = (self.passes as i32 + delta).clamp(0, MAX_PASSES as i32) as u32;
    }

    pub fn adjust_threshold(&mut self, delta: f32) {
        self.threshold = (self.threshold + delta).clamp(0.0, 1.0);
    }

    pub fn adjust_downscale(&mut self, delta: f32) {
        self.downscale = (self.downscale + delta).clamp(MIN_DOWNSCALE, MAX_DOWNSCALE);
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn blur_size(&self, width: u32, height: u32) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 / self.downscale) as u32).max(1);
        (scale(width), scale(height))
    }

    /// Stages to run this frame. `post_processing` is false for scenes that
    /// bypass the chain; those present the scene target directly.
    pub fn plan(&self, post_processing: bool) -> Vec<PostStage> {
        use PostBuffer::*;
        use StageKind::*;

        if !(self.enabled && post_processing) {
            return vec![PostStage::new(Present, Scene, Surface)];
        }

        let mut stages = vec![
            PostStage::new(Passthrough, Scene, Output),
            PostStage::new(Threshold, Output, Bright),
        ];
        for _ in 0..self.passes {
            stages.push(PostStage::new(BlurHorizontal, Bright, Blur));
            stages.push(PostStage::new(BlurVertical, Blur, Bright));
        }
        stages.push(PostStage::with_second(Composite, Scene, Bright, Output));
        stages.push(PostStage::new(Present, Output, Surface));
        stages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostBuffer {
    Scene,
    Bright,
    Blur,
    Output,
    Surface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Passthrough,
    Threshold,
    BlurHorizontal,
    BlurVertical,
    Composite,
    Present,
}

impl StageKind {
    const OFFSCREEN: [StageKind; 5] = [
        StageKind::Passthrough,
        StageKind::Threshold,
        StageKind::BlurHorizontal,
        StageKind::BlurVertical,
        StageKind::Composite,
    ];

    fn entry_point(&self) -> &'static str {
        match self {
            StageKind::Passthrough | StageKind::Present => "fs_passthrough",
            StageKind::Threshold => "fs_threshold",
            StageKind::BlurHorizontal => "fs_blur_h",
            StageKind::BlurVertical => "fs_blur_v",
            StageKind::Composite => "fs_composite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostStage {
    pub kind: StageKind,
    pub source: PostBuffer,
    pub second: Option<PostBuffer>,
    pub target: PostBuffer,
}

impl PostStage {
    fn new(kind: StageKind, source: PostBuffer, target: PostBuffer) -> Self {
        Self { kind, source, second: None, target }
    }

    fn with_second(kind: StageKind, source: PostBuffer, second: PostBuffer, target: PostBuffer) -> Self {
        Self { kind, source, second: Some(second), target }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct PostParams {
    texel: [f32; 2],
    threshold: f32,
    _pad: f32,
}

struct Target {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

fn create_target(device: &wgpu::Device, label: &str, width: u32, height: u32) -> Target {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d { width: width.max(1), height: height.max(1), depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: SCENE_COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    Target { _texture: texture, view }
}

/// Offscreen buffers and fullscreen pipelines for the bloom chain. The scene
/// renderer draws into `scene_view()` / `depth_view()`, then `encode` runs a plan.
pub struct BloomChain {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    params_buffer: wgpu::Buffer,
    pipelines: HashMap<StageKind, wgpu::RenderPipeline>,
    scene: Target,
    _depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    bright: Target,
    blur: Target,
    output: Target,
    width: u32,
    height: u32,
    downscale: f32,
}

impl BloomChain {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        settings: &BloomSettings,
    ) -> Self {
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bind_group_layout"),
            entries: &[
                texture_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                texture_entry(3),
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("post_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("post_params"),
            size: std::mem::size_of::<PostParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/post.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pipeline_layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let mut pipelines = HashMap::new();
        for kind in StageKind::OFFSCREEN {
            pipelines.insert(kind, create_post_pipeline(device, &pipeline_layout, &shader, kind, SCENE_COLOR_FORMAT));
        }
        pipelines.insert(
            StageKind::Present,
            create_post_pipeline(device, &pipeline_layout, &shader, StageKind::Present, surface_format),
        );

        let (blur_w, blur_h) = settings.blur_size(width, height);
        let (depth_texture, depth_view) = create_depth_texture(device, width.max(1), height.max(1));
        Self {
            layout,
            sampler,
            params_buffer,
            pipelines,
            scene: create_target(device, "scene_target", width, height),
            _depth_texture: depth_texture,
            depth_view,
            bright: create_target(device, "bright_target", blur_w, blur_h),
            blur: create_target(device, "blur_target", blur_w, blur_h),
            output: create_target(device, "output_target", width, height),
            width,
            height,
            downscale: settings.downscale,
        }
    }

    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.scene.view
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.scene = create_target(device, "scene_target", width, height);
        self.output = create_target(device, "output_target", width, height);
        let (depth_texture, depth_view) = create_depth_texture(device, width, height);
        self._depth_texture = depth_texture;
        self.depth_view = depth_view;
        self.recreate_blur_targets(device);
    }

    fn recreate_blur_targets(&mut self, device: &wgpu::Device) {
        let settings = BloomSettings { downscale: self.downscale, ..Default::default() };
        let (w, h) = settings.blur_size(self.width, self.height);
        self.bright = create_target(device, "bright_target", w, h);
        self.blur = create_target(device, "blur_target", w, h);
        tracing::debug!(width = w, height = h, "bloom buffers recreated");
    }

    /// Pick up changed settings before encoding a frame.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, settings: &BloomSettings) {
        if settings.downscale != self.downscale {
            self.downscale = settings.downscale;
            self.recreate_blur_targets(device);
        }
        let params = PostParams {
            texel: [1.0 / self.width.max(1) as f32, 1.0 / self.height.max(1) as f32],
            threshold: settings.threshold,
            _pad: 0.0,
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }

    fn view<'a>(&'a self, buffer: PostBuffer, surface: &'a wgpu::TextureView) -> &'a wgpu::TextureView {
        match buffer {
            PostBuffer::Scene => &self.scene.view,
            PostBuffer::Bright => &self.bright.view,
            PostBuffer::Blur => &self.blur.view,
            PostBuffer::Output => &self.output.view,
            PostBuffer::Surface => surface,
        }
    }

    pub fn encode(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        stages: &[PostStage],
        surface_view: &wgpu::TextureView,
    ) {
        for stage in stages {
            let Some(pipeline) = self.pipelines.get(&stage.kind) else {
                continue;
            };
            let source = self.view(stage.source, surface_view);
            let second = self.view(stage.second.unwrap_or(stage.source), surface_view);
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("post_bind_group"),
                layout: &self.layout,
                entries: &[
                    wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(source) },
                    wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&self.sampler) },
                    wgpu::BindGroupEntry { binding: 2, resource: self.params_buffer.as_entire_binding() },
                    wgpu::BindGroupEntry { binding: 3, resource: wgpu::BindingResource::TextureView(second) },
                ],
            });

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("post_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.view(stage.target, surface_view),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
    }
}

fn create_post_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    kind: StageKind,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(kind.entry_point()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(kind.entry_point()),
            targets: &[Some(wgpu::ColorTargetState { format, blend: None, write_mask: wgpu::ColorWrites::ALL })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
