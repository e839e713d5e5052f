#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use gpu::{ColorSpace, ColorVertex, Mat4, RenderFrame};
    use std::borrow::Cow;
    use wasm_bindgen::prelude::*;

    /// Geometry of one scene entity, uploaded once.
    #[derive(Debug)]
    pub struct GpuMesh {
        pub vertex_buffer: ::wgpu::Buffer,
        pub index_buffer: ::wgpu::Buffer,
        pub index_count: u32,
        pub double_sided: bool,
    }

    #[derive(Debug)]
    pub struct WgpuContext {
        pub _instance: &'static ::wgpu::Instance,
        pub surface: ::wgpu::Surface<'static>,
        pub device: ::wgpu::Device,
        pub queue: ::wgpu::Queue,
        pub config: ::wgpu::SurfaceConfiguration,
        pub _canvas: web_sys::HtmlCanvasElement,
        pub color_space: ColorSpace,
        pub max_dimension: u32,
        pub front_pipeline: ::wgpu::RenderPipeline,
        pub double_sided_pipeline: ::wgpu::RenderPipeline,
        pub uniform_buffer: ::wgpu::Buffer,
        pub uniform_bind_group: ::wgpu::BindGroup,
        pub depth_view: ::wgpu::TextureView,
        pub meshes: Vec<GpuMesh>,
    }

    const MESH_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec3<f32>) -> VsOut {
    return VsOut(globals.view_proj * vec4<f32>(position, 1.0), color);
}

@fragment
fn fs_main(fs_in: VsOut) -> @location(0) vec4<f32> {
    // Shading is baked per vertex on the CPU.
    return vec4<f32>(fs_in.color, 1.0);
}
"#;

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Globals {
        view_proj: [[f32; 4]; 4],
    }

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("fluidview-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Depth24Plus,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    fn create_mesh_pipeline(
        device: &::wgpu::Device,
        layout: &::wgpu::PipelineLayout,
        shader: &::wgpu::ShaderModule,
        format: ::wgpu::TextureFormat,
        cull_mode: Option<::wgpu::Face>,
        label: &str,
    ) -> ::wgpu::RenderPipeline {
        device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: ::wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ColorVertex>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                    ],
                }],
            },
            fragment: Some(::wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format,
                    blend: Some(::wgpu::BlendState::REPLACE),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                cull_mode,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(::wgpu::DepthStencilState {
                format: ::wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: true,
                depth_compare: ::wgpu::CompareFunction::Less,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    pub async fn init_wgpu_from_canvas(
        canvas_elem: web_sys::HtmlCanvasElement,
    ) -> Result<WgpuContext, JsValue> {
        let width = canvas_elem.width();
        let height = canvas_elem.height();

        // IMPORTANT: `wgpu::Surface` must not outlive its `wgpu::Instance`.
        // To avoid UB, we leak the instance for the lifetime of the app.
        //
        // Prefer WebGPU when available, but allow WebGL as a fallback.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas_elem.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("fluidview-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("device error: {e}")))?;

        let max_dimension = device.limits().max_texture_dimension_2d;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .cloned()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| JsValue::from_str("surface reports no formats"))?;
        let color_space = if format.is_srgb() {
            ColorSpace::Linear
        } else {
            ColorSpace::Srgb
        };

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.clamp(1, max_dimension),
            height: height.clamp(1, max_dimension),
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);

        let shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("fluidview-mesh-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(MESH_SHADER)),
        });

        let uniform_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("fluidview-globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
                label: Some("fluidview-globals-bgl"),
                entries: &[::wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ::wgpu::ShaderStages::VERTEX,
                    ty: ::wgpu::BindingType::Buffer {
                        ty: ::wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("fluidview-globals-bg"),
            layout: &uniform_bind_group_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("fluidview-mesh-pipeline-layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            immediate_size: 0,
        });

        let front_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            Some(::wgpu::Face::Back),
            "fluidview-front-pipeline",
        );
        let double_sided_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            None,
            "fluidview-double-sided-pipeline",
        );

        // Initialize uniforms so the first render doesn't read uninitialized memory.
        let globals = Globals {
            view_proj: [[0.0; 4]; 4],
        };
        queue.write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&globals));

        Ok(WgpuContext {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            _canvas: canvas_elem,
            color_space,
            max_dimension,
            front_pipeline,
            double_sided_pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            meshes: Vec::new(),
        })
    }

    pub fn color_space(ctx: &WgpuContext) -> ColorSpace {
        ctx.color_space
    }

    /// Upload every command as its own vertex/index buffer pair.
    pub fn upload_frame(ctx: &mut WgpuContext, frame: &RenderFrame) {
        ctx.meshes = frame
            .commands
            .iter()
            .filter(|cmd| !cmd.mesh.indices.is_empty())
            .map(|cmd| GpuMesh {
                vertex_buffer: ctx
                    .device
                    .create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                        label: Some("fluidview-mesh-vertices"),
                        contents: bytemuck::cast_slice(&cmd.mesh.vertices),
                        usage: ::wgpu::BufferUsages::VERTEX,
                    }),
                index_buffer: ctx
                    .device
                    .create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                        label: Some("fluidview-mesh-indices"),
                        contents: bytemuck::cast_slice(&pad_indices(&cmd.mesh.indices)),
                        usage: ::wgpu::BufferUsages::INDEX,
                    }),
                index_count: cmd.mesh.index_count(),
                double_sided: cmd.double_sided,
            })
            .collect();
    }

    // Buffer sizes must be a multiple of 4 bytes; u16 index lists of odd
    // length get one unused trailing index.
    fn pad_indices(indices: &[u16]) -> Vec<u16> {
        let mut out = indices.to_vec();
        if out.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    pub fn resize_wgpu(ctx: &mut WgpuContext, width: u32, height: u32) {
        ctx.config.width = width.clamp(1, ctx.max_dimension);
        ctx.config.height = height.clamp(1, ctx.max_dimension);
        ctx.surface.configure(&ctx.device, &ctx.config);
        ctx.depth_view = create_depth_view(&ctx.device, &ctx.config);
    }

    pub fn render_scene(ctx: &WgpuContext, view_proj: Mat4, clear: [f64; 4]) -> Result<(), JsValue> {
        let frame = ctx
            .surface
            .get_current_texture()
            .map_err(|e| JsValue::from_str(&format!("surface acquire failed: {e}")))?;
        let view = frame
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());

        ctx.queue.write_buffer(
            &ctx.uniform_buffer,
            0,
            bytemuck::bytes_of(&Globals { view_proj }),
        );

        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("fluidview-encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("fluidview-scene-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(::wgpu::Color {
                            r: clear[0],
                            g: clear[1],
                            b: clear[2],
                            a: clear[3],
                        }),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(1.0),
                        store: ::wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_bind_group(0, &ctx.uniform_bind_group, &[]);
            for mesh in &ctx.meshes {
                let pipeline = if mesh.double_sided {
                    &ctx.double_sided_pipeline
                } else {
                    &ctx.front_pipeline
                };
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), ::wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::{ColorSpace, Mat4, RenderFrame};
    use wasm_bindgen::prelude::JsValue;

    #[derive(Debug, Default)]
    pub struct WgpuContext;

    pub async fn init_wgpu_from_canvas(
        _canvas: web_sys::HtmlCanvasElement,
    ) -> Result<WgpuContext, JsValue> {
        Err(JsValue::from_str(
            "wgpu initialization is only available on wasm32 targets",
        ))
    }

    pub fn color_space(_ctx: &WgpuContext) -> ColorSpace {
        ColorSpace::Srgb
    }

    pub fn upload_frame(_ctx: &mut WgpuContext, _frame: &RenderFrame) {}

    pub fn resize_wgpu(_ctx: &mut WgpuContext, _width: u32, _height: u32) {}

    pub fn render_scene(
        _ctx: &WgpuContext,
        _view_proj: Mat4,
        _clear: [f64; 4],
    ) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "wgpu rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{
    WgpuContext, color_space, init_wgpu_from_canvas, render_scene, resize_wgpu, upload_frame,
};
