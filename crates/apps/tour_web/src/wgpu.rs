#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use gpu::{RenderBackend, RenderError, RenderFrame, SurfaceSize};
    use scene::components::{DecodedImage, Material, MaterialId, MeshId, Side, SphereGeometry};
    use std::borrow::Cow;
    use std::collections::BTreeMap;
    use tracing::{debug, info};
    use wasm_bindgen::JsCast;

    const PANORAMA_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
};

struct MaterialUniform {
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> material: MaterialUniform;
@group(1) @binding(1)
var diffuse: texture_2d<f32>;
@group(1) @binding(2)
var diffuse_sampler: sampler;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) uv: vec2<f32>) -> VsOut {
    return VsOut(globals.view_proj * vec4<f32>(position, 1.0), uv);
}

@fragment
fn fs_main(fs_in: VsOut) -> @location(0) vec4<f32> {
    // Untextured materials bind a 1x1 white texture.
    return material.color * textureSample(diffuse, diffuse_sampler, fs_in.uv);
}
"#;

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Vertex {
        position: [f32; 3],
        uv: [f32; 2],
    }

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Globals {
        view_proj: [[f32; 4]; 4],
    }

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct MaterialUniform {
        color: [f32; 4],
    }

    struct GpuMesh {
        vertex_buffer: ::wgpu::Buffer,
        index_buffer: ::wgpu::Buffer,
        index_count: u32,
        line_buffer: ::wgpu::Buffer,
        line_count: u32,
    }

    struct GpuMaterial {
        bind_group: ::wgpu::BindGroup,
        _uniform: ::wgpu::Buffer,
        texture: Option<::wgpu::Texture>,
    }

    struct Pipelines {
        fill: ::wgpu::RenderPipeline,
        fill_culled: ::wgpu::RenderPipeline,
        lines: ::wgpu::RenderPipeline,
    }

    pub struct WgpuBackend {
        _instance: &'static ::wgpu::Instance,
        surface: ::wgpu::Surface<'static>,
        device: ::wgpu::Device,
        queue: ::wgpu::Queue,
        config: ::wgpu::SurfaceConfiguration,
        _canvas: web_sys::HtmlCanvasElement,
        pipelines: Pipelines,
        globals_buffer: ::wgpu::Buffer,
        globals_bind_group: ::wgpu::BindGroup,
        material_layout: ::wgpu::BindGroupLayout,
        sampler: ::wgpu::Sampler,
        white_view: ::wgpu::TextureView,
        depth_view: ::wgpu::TextureView,
        meshes: BTreeMap<MeshId, GpuMesh>,
        materials: BTreeMap<MaterialId, GpuMaterial>,
        next_id: u64,
        released: bool,
    }

    impl std::fmt::Debug for WgpuBackend {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("WgpuBackend")
                .field("width", &self.config.width)
                .field("height", &self.config.height)
                .field("meshes", &self.meshes.len())
                .field("materials", &self.materials.len())
                .field("released", &self.released)
                .finish()
        }
    }

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("tour-depth"),
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

    fn create_rgba_texture(
        device: &::wgpu::Device,
        queue: &::wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> ::wgpu::Texture {
        let size = ::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: ::wgpu::TextureUsages::TEXTURE_BINDING | ::wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            ::wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: ::wgpu::Origin3d::ZERO,
                aspect: ::wgpu::TextureAspect::All,
            },
            rgba,
            ::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        texture
    }

    fn create_pipeline(
        device: &::wgpu::Device,
        layout: &::wgpu::PipelineLayout,
        shader: &::wgpu::ShaderModule,
        format: ::wgpu::TextureFormat,
        label: &str,
        topology: ::wgpu::PrimitiveTopology,
        cull_mode: Option<::wgpu::Face>,
    ) -> ::wgpu::RenderPipeline {
        device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: ::wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x2,
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
                topology,
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
                depth_compare: ::wgpu::CompareFunction::LessEqual,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    pub async fn init_wgpu_from_canvas_id(
        canvas_id: &str,
        size: SurfaceSize,
    ) -> Result<WgpuBackend, RenderError> {
        let surface_err = |msg: String| RenderError::Surface(msg);
        let window = web_sys::window().ok_or_else(|| surface_err("window missing".into()))?;
        let document = window
            .document()
            .ok_or_else(|| surface_err("document missing".into()))?;
        let canvas_elem = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| surface_err(format!("canvas #{canvas_id} missing")))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| surface_err(format!("#{canvas_id} is not a canvas")))?;

        canvas_elem.set_width(size.physical_width());
        canvas_elem.set_height(size.physical_height());

        // `wgpu::Surface` must not outlive its `wgpu::Instance`, so the
        // instance lives for the rest of the page.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas_elem.clone()))
            .map_err(|e| surface_err(format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| surface_err(format!("adapter error: {e}")))?;

        // Panoramas are large; take whatever texture size the adapter offers.
        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("tour-wgpu-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(|e| surface_err(format!("device error: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| surface_err("surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(::wgpu::CompositeAlphaMode::Auto);

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.physical_width(),
            height: size.physical_height(),
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("tour-panorama-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(PANORAMA_SHADER)),
        });

        let globals_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
            label: Some("tour-globals"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: [[0.0; 4]; 4],
            }),
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("tour-globals-bgl"),
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

        let globals_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("tour-globals-bg"),
            layout: &globals_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let material_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("tour-material-bgl"),
            entries: &[
                ::wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ::wgpu::ShaderStages::FRAGMENT,
                    ty: ::wgpu::BindingType::Buffer {
                        ty: ::wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                ::wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ::wgpu::ShaderStages::FRAGMENT,
                    ty: ::wgpu::BindingType::Texture {
                        sample_type: ::wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: ::wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                ::wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: ::wgpu::ShaderStages::FRAGMENT,
                    ty: ::wgpu::BindingType::Sampler(::wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("tour-pipeline-layout"),
            bind_group_layouts: &[&globals_layout, &material_layout],
            immediate_size: 0,
        });

        let pipelines = Pipelines {
            fill: create_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                format,
                "tour-fill-pipeline",
                ::wgpu::PrimitiveTopology::TriangleList,
                None,
            ),
            fill_culled: create_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                format,
                "tour-fill-culled-pipeline",
                ::wgpu::PrimitiveTopology::TriangleList,
                Some(::wgpu::Face::Back),
            ),
            lines: create_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                format,
                "tour-wireframe-pipeline",
                ::wgpu::PrimitiveTopology::LineList,
                None,
            ),
        };

        // Equirectangular maps wrap horizontally and clamp at the poles.
        let sampler = device.create_sampler(&::wgpu::SamplerDescriptor {
            label: Some("tour-panorama-sampler"),
            address_mode_u: ::wgpu::AddressMode::Repeat,
            address_mode_v: ::wgpu::AddressMode::ClampToEdge,
            mag_filter: ::wgpu::FilterMode::Linear,
            min_filter: ::wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white = create_rgba_texture(&device, &queue, "tour-white", 1, 1, &[255; 4]);
        let white_view = white.create_view(&::wgpu::TextureViewDescriptor::default());

        info!(
            width = config.width,
            height = config.height,
            max_texture = device.limits().max_texture_dimension_2d,
            "wgpu surface ready"
        );

        Ok(WgpuBackend {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            _canvas: canvas_elem,
            pipelines,
            globals_buffer,
            globals_bind_group,
            material_layout,
            sampler,
            white_view,
            depth_view,
            meshes: BTreeMap::new(),
            materials: BTreeMap::new(),
            next_id: 0,
            released: false,
        })
    }

    impl WgpuBackend {
        fn next_id(&mut self) -> u64 {
            self.next_id += 1;
            self.next_id
        }

        fn check_live(&self) -> Result<(), RenderError> {
            if self.released {
                Err(RenderError::Released)
            } else {
                Ok(())
            }
        }
    }

    impl RenderBackend for WgpuBackend {
        fn resize(&mut self, size: SurfaceSize) {
            if self.released {
                return;
            }
            self.config.width = size.physical_width();
            self.config.height = size.physical_height();
            self._canvas.set_width(self.config.width);
            self._canvas.set_height(self.config.height);
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }

        fn upload_mesh(&mut self, geometry: &SphereGeometry) -> Result<MeshId, RenderError> {
            self.check_live()?;
            let vertices: Vec<Vertex> = geometry
                .positions
                .iter()
                .zip(&geometry.uvs)
                .map(|(position, uv)| Vertex {
                    position: *position,
                    uv: *uv,
                })
                .collect();
            let lines = geometry.wireframe_indices();

            let vertex_buffer = self.device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("tour-sphere-vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: ::wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = self.device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("tour-sphere-indices"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: ::wgpu::BufferUsages::INDEX,
            });
            let line_buffer = self.device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("tour-sphere-lines"),
                contents: bytemuck::cast_slice(&lines),
                usage: ::wgpu::BufferUsages::INDEX,
            });

            let id = MeshId(self.next_id());
            self.meshes.insert(
                id,
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: geometry.indices.len() as u32,
                    line_buffer,
                    line_count: lines.len() as u32,
                },
            );
            debug!(mesh = id.0, vertices = vertices.len(), "mesh uploaded");
            Ok(id)
        }

        fn upload_material(
            &mut self,
            material: &Material,
            image: Option<&DecodedImage>,
        ) -> Result<MaterialId, RenderError> {
            self.check_live()?;
            let texture = match (material.textured, image) {
                (true, None) => return Err(RenderError::MissingTexture),
                (true, Some(img)) => {
                    let max = self.device.limits().max_texture_dimension_2d;
                    if img.width > max || img.height > max {
                        return Err(RenderError::Upload(format!(
                            "{}x{} exceeds the {max}px texture limit",
                            img.width, img.height
                        )));
                    }
                    Some(create_rgba_texture(
                        &self.device,
                        &self.queue,
                        "tour-panorama",
                        img.width,
                        img.height,
                        &img.rgba,
                    ))
                }
                (false, _) => None,
            };

            let uniform = self.device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("tour-material"),
                contents: bytemuck::bytes_of(&MaterialUniform {
                    color: material.color.to_rgba(),
                }),
                usage: ::wgpu::BufferUsages::UNIFORM,
            });
            let view = texture
                .as_ref()
                .map(|t| t.create_view(&::wgpu::TextureViewDescriptor::default()));
            let bind_group = self.device.create_bind_group(&::wgpu::BindGroupDescriptor {
                label: Some("tour-material-bg"),
                layout: &self.material_layout,
                entries: &[
                    ::wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform.as_entire_binding(),
                    },
                    ::wgpu::BindGroupEntry {
                        binding: 1,
                        resource: ::wgpu::BindingResource::TextureView(
                            view.as_ref().unwrap_or(&self.white_view),
                        ),
                    },
                    ::wgpu::BindGroupEntry {
                        binding: 2,
                        resource: ::wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });

            let id = MaterialId(self.next_id());
            self.materials.insert(
                id,
                GpuMaterial {
                    bind_group,
                    _uniform: uniform,
                    texture,
                },
            );
            Ok(id)
        }

        fn release_mesh(&mut self, id: MeshId) {
            if let Some(mesh) = self.meshes.remove(&id) {
                mesh.vertex_buffer.destroy();
                mesh.index_buffer.destroy();
                mesh.line_buffer.destroy();
            }
        }

        fn release_material(&mut self, id: MaterialId) {
            if let Some(material) = self.materials.remove(&id)
                && let Some(texture) = material.texture
            {
                texture.destroy();
            }
        }

        fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
            self.check_live()?;
            let surface_tex = self
                .surface
                .get_current_texture()
                .map_err(|e| RenderError::Draw(format!("surface acquire failed: {e}")))?;
            let view = surface_tex
                .texture
                .create_view(&::wgpu::TextureViewDescriptor::default());

            self.queue.write_buffer(
                &self.globals_buffer,
                0,
                bytemuck::bytes_of(&Globals {
                    view_proj: frame.view_proj,
                }),
            );

            let [r, g, b, a] = frame.clear_color;
            let mut encoder = self
                .device
                .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                    label: Some("tour-frame-encoder"),
                });
            {
                let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                    label: Some("tour-panorama-pass"),
                    color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        depth_slice: None,
                        ops: ::wgpu::Operations {
                            load: ::wgpu::LoadOp::Clear(::wgpu::Color {
                                r: r as f64,
                                g: g as f64,
                                b: b as f64,
                                a: a as f64,
                            }),
                            store: ::wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
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

                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                for draw in &frame.draws {
                    let mesh = self
                        .meshes
                        .get(&draw.mesh)
                        .ok_or(RenderError::UnknownMesh(draw.mesh))?;
                    let material = self
                        .materials
                        .get(&draw.material)
                        .ok_or(RenderError::UnknownMaterial(draw.material))?;

                    rpass.set_bind_group(1, &material.bind_group, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    if draw.wireframe {
                        rpass.set_pipeline(&self.pipelines.lines);
                        rpass.set_index_buffer(mesh.line_buffer.slice(..), ::wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..mesh.line_count, 0, 0..1);
                    } else {
                        let pipeline = match draw.side {
                            Side::Double => &self.pipelines.fill,
                            Side::Front | Side::Back => &self.pipelines.fill_culled,
                        };
                        rpass.set_pipeline(pipeline);
                        rpass.set_index_buffer(mesh.index_buffer.slice(..), ::wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                }
            }

            self.queue.submit(std::iter::once(encoder.finish()));
            surface_tex.present();
            Ok(())
        }

        fn release(&mut self) {
            if self.released {
                return;
            }
            let ids: Vec<MeshId> = self.meshes.keys().copied().collect();
            for id in ids {
                self.release_mesh(id);
            }
            let ids: Vec<MaterialId> = self.materials.keys().copied().collect();
            for id in ids {
                self.release_material(id);
            }
            self.released = true;
            info!("wgpu backend released");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::{RenderBackend, RenderError, RenderFrame, SurfaceSize};
    use scene::components::{DecodedImage, Material, MaterialId, MeshId, SphereGeometry};

    #[derive(Debug, Default)]
    pub struct WgpuBackend;

    pub async fn init_wgpu_from_canvas_id(
        _canvas_id: &str,
        _size: SurfaceSize,
    ) -> Result<WgpuBackend, RenderError> {
        Err(RenderError::Surface(
            "wgpu initialization is only available on wasm32 targets".into(),
        ))
    }

    impl RenderBackend for WgpuBackend {
        fn resize(&mut self, _size: SurfaceSize) {}

        fn upload_mesh(&mut self, _geometry: &SphereGeometry) -> Result<MeshId, RenderError> {
            Err(RenderError::Released)
        }

        fn upload_material(
            &mut self,
            _material: &Material,
            _image: Option<&DecodedImage>,
        ) -> Result<MaterialId, RenderError> {
            Err(RenderError::Released)
        }

        fn release_mesh(&mut self, _id: MeshId) {}

        fn release_material(&mut self, _id: MaterialId) {}

        fn render(&mut self, _frame: &RenderFrame) -> Result<(), RenderError> {
            Err(RenderError::Released)
        }

        fn release(&mut self) {}
    }
}

pub use imp::{WgpuBackend, init_wgpu_from_canvas_id};
