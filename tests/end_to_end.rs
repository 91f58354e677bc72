use derplot::{
    BufferError, Color, Command, DrawMode, ExternalPixels, MatrixTarget, PixelBuffer, PixelStorage,
    Plotter, PointSize, Region, RenderState, Vector4,
};
use std::sync::Mutex;
use std::time::Duration;
use test_log::test;

const WHITE: u32 = 0xFFFF_FFFF;
const BLACK: u32 = 0xFF00_0000;

#[test]
fn diagonal_across_four_by_four_buffer() {
    let plotter = Plotter::new(4, 4).unwrap();
    plotter.clear();
    plotter.draw_line(Vector4::new(-1.0, -1.0, 0.0, 1.0), Vector4::new(1.0, 1.0, 0.0, 1.0));
    plotter.drain();

    let mut pixels = [0u32; 16];
    assert_eq!(plotter.copy_into(&mut pixels), Ok(16));
    for y in 0..4 {
        for x in 0..4 {
            let expected = if x + y == 3 { WHITE } else { BLACK };
            assert_eq!(pixels[y * 4 + x], expected, "pixel ({}, {})", x, y);
        }
    }
    plotter.shutdown();
}

#[test]
fn shutdown_applies_everything_queued_before_it() {
    let plotter = Plotter::new(8, 8).unwrap();
    for i in 0..100 {
        plotter.set_front_color(Color(i));
    }
    let report = plotter.request_report().unwrap();
    plotter.shutdown();

    let report = report.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(report.front_color, Color(99));
    assert!(!plotter.is_ready());
}

#[test]
fn plotter_is_inert_after_shutdown() {
    let plotter = Plotter::new(2, 2).unwrap();
    plotter.shutdown();

    plotter.plot_raw_point((0, 0));
    plotter.clear();
    plotter.drain();
    plotter.shutdown();

    assert!(plotter.request_report().is_none());
    assert!(plotter.report().is_none());
    assert_eq!(plotter.pixels(), vec![0; 4]);
}

#[test]
fn each_producer_keeps_its_own_order() {
    const PRODUCERS: u32 = 4;
    const ROUNDS: u32 = 200;

    let plotter = Plotter::new(1, PRODUCERS).unwrap();
    // Keeps each color+plot pair adjacent in the queue.
    let pair = Mutex::new(());

    std::thread::scope(|scope| {
        for producer in 0..PRODUCERS {
            let (plotter, pair) = (&plotter, &pair);
            scope.spawn(move || {
                for round in 0..ROUNDS {
                    let _guard = pair.lock().unwrap();
                    plotter.set_front_color(Color(producer << 16 | round));
                    plotter.plot_raw_point((0, producer as i32));
                }
            });
        }
    });
    plotter.drain();

    let pixels = plotter.pixels();
    for producer in 0..PRODUCERS {
        assert_eq!(pixels[producer as usize], producer << 16 | (ROUNDS - 1));
    }
}

#[test]
fn queued_commands_match_direct_application() {
    let commands = vec![
        Command::SetClearColor(Color(0xFF20_2020)),
        Command::Clear,
        Command::SetPerspective {
            fovy: 60.0,
            near: 0.01,
            far: 100.0,
            aspect: 1.0,
        },
        Command::Translate {
            offset: Vector4::point(0.0, 0.0, -3.0),
            target: MatrixTarget::Projection,
        },
        Command::Rotate {
            axis: derplot::Axis::Y,
            angle: 0.4,
            target: MatrixTarget::ModelView,
        },
        Command::SetFrontColor(Color::RED),
        Command::DrawPrimitives {
            mode: DrawMode::LineLoop,
            vertices: vec![
                Vector4::point(-1.0, -1.0, 0.0),
                Vector4::point(1.0, -1.0, 0.0),
                Vector4::point(1.0, 1.0, 0.0),
                Vector4::point(-1.0, 1.0, 0.0),
            ]
            .into_boxed_slice(),
        },
        Command::SetFrontColor(Color::GREEN),
        Command::PlotPoint {
            point: Vector4::point(0.0, 0.0, 0.0),
            size: PointSize::Big,
        },
        Command::SetViewport(Region::new(4, 27, 4, 27)),
        Command::DrawLine {
            from: Vector4::point(-1.0, 0.0, 0.0),
            to: Vector4::point(1.0, 0.5, 0.0),
        },
        Command::DrawRawLine {
            from: (0, 31).into(),
            to: (31, 20).into(),
        },
    ];

    let mut direct = RenderState::new(PixelBuffer::new(32, 32).into_shared());
    for command in commands.iter().cloned() {
        direct.apply(command);
    }

    let plotter = Plotter::new(32, 32).unwrap();
    for command in commands {
        plotter.submit(command);
    }
    plotter.drain();

    let expected = direct.buffer().lock().unwrap().pixels().to_vec();
    assert_eq!(plotter.pixels(), expected);
    assert_eq!(plotter.report(), Some(direct.report()));
}

#[test]
fn borrowed_storage_receives_the_drawing() {
    let mut cells = vec![0u32; 12];
    let external =
        unsafe { ExternalPixels::from_raw_parts(cells.as_mut_ptr(), cells.len()) }.unwrap();

    let plotter = Plotter::with_storage(4, 3, PixelStorage::Borrowed(external)).unwrap();
    plotter.set_clear_color(Color::BLUE);
    plotter.clear();
    plotter.plot_raw_big_point((1, 1));
    let buffer = plotter.into_buffer();
    assert!(matches!(buffer.storage(), PixelStorage::Borrowed(_)));
    drop(buffer);

    let blue = Color::BLUE.0;
    #[rustfmt::skip]
    let expected = vec![
        blue,  WHITE, blue,  blue,
        WHITE, WHITE, WHITE, blue,
        blue,  WHITE, blue,  blue,
    ];
    assert_eq!(cells, expected);
}

#[test]
fn owned_storage_is_handed_back() {
    let plotter = Plotter::with_storage(2, 2, vec![7u32; 4].into()).unwrap();
    plotter.plot_raw_point((1, 0));
    let buffer = plotter.into_buffer();
    match buffer.into_storage() {
        PixelStorage::Owned(cells) => assert_eq!(&*cells, &[7, WHITE, 7, 7]),
        PixelStorage::Borrowed(_) => panic!("expected owned storage"),
    }
}

#[test]
fn storage_of_wrong_size_is_rejected() {
    let err = Plotter::with_storage(4, 4, vec![0u32; 15].into()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<BufferError>(),
        Some(&BufferError::SizeMismatch {
            expected: 16,
            actual: 15
        })
    );

    let null = unsafe { ExternalPixels::from_raw_parts(std::ptr::null_mut(), 4) };
    assert!(matches!(null, Err(BufferError::NullStorage)));
}

#[test]
fn zero_sized_plotter_is_not_ready() {
    let plotter = Plotter::new(0, 10).unwrap();
    assert!(!plotter.is_ready());

    plotter.clear();
    plotter.draw_line(Vector4::point(-1.0, -1.0, 0.0), Vector4::point(1.0, 1.0, 0.0));
    plotter.drain();
    plotter.shutdown();

    assert!(plotter.report().is_none());
    assert!(plotter.pixels().is_empty());
    assert_eq!(plotter.copy_into(&mut []), Ok(0));
}

#[test]
fn copies_fail_on_short_destination() {
    let plotter = Plotter::new(2, 2).unwrap();
    plotter.clear();
    plotter.drain();

    let mut cells = [0u32; 3];
    assert_eq!(
        plotter.copy_into(&mut cells),
        Err(BufferError::DestinationTooSmall {
            required: 4,
            actual: 3
        })
    );

    let mut bytes = [0u8; 8];
    assert_eq!(
        plotter.copy_bytes_into(&mut bytes),
        Err(BufferError::DestinationTooSmall {
            required: 16,
            actual: 8
        })
    );

    let mut bytes = [0u8; 16];
    assert_eq!(plotter.copy_bytes_into(&mut bytes), Ok(16));
    assert_eq!(&bytes[..4], &BLACK.to_ne_bytes());
}
