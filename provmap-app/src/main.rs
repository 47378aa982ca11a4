use provmap::prelude::*;
use std::sync::Arc;

/// Scripted headless session: hydrate a map, hover and toggle a few
/// provinces, and print the state the UI would render.
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let gateway = Arc::new(InMemoryGateway::with_latency(Duration::from_millis(30)));
    gateway
        .seed_record("demo", "HoChiMinh", Some("bánh mì crawl through District 1"))
        .await;

    let mut probe = FixedLayout::new(ContainerLayout::new(
        LayoutRect::new(0.0, 0.0, 1024.0, 768.0),
        0.0,
        0.0,
    ));
    probe.set_shape("HaNoi", LayoutRect::new(430.0, 90.0, 36.0, 40.0));
    probe.set_shape("DaNang", LayoutRect::new(520.0, 360.0, 30.0, 34.0));
    probe.set_shape("HoChiMinh", LayoutRect::new(470.0, 640.0, 44.0, 38.0));
    let total = probe.province_count();

    let mut page = MapPageController::new(probe, gateway, "demo", total);
    let t0 = Instant::now();
    page.hydrate(t0).await?;
    println!("mounted: {:?}", page.stats());

    // Hover an unvisited province: tooltip with its display name.
    page.handle_event(
        PointerEvent::Enter {
            province: ProvinceId::from("DaNang"),
            position: Point::new(530.0, 370.0),
        },
        Instant::now(),
    );
    println!("tooltip: {:?}", page.tooltip().content());
    page.handle_event(
        PointerEvent::Leave {
            province: ProvinceId::from("DaNang"),
        },
        Instant::now(),
    );

    // Toggle two provinces on, optimistically, then sync.
    for name in ["HaNoi", "DaNang"] {
        let pending = page.handle_event(
            PointerEvent::Click {
                province: ProvinceId::from(name),
                position: Point::new(0.0, 0.0),
            },
            Instant::now(),
        );
        println!("clicked {name}: {:?}", page.stats());
        for toggle in pending {
            let result = page.submit(&toggle).await;
            page.reconcile(&result, Instant::now());
        }
    }

    // Let the entrance animations settle.
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(16)).await;
        page.frame(Instant::now());
    }
    for pin in page.pins().iter() {
        let (pos, opacity) = pin.render_state(Instant::now());
        println!(
            "pin {} at ({:.0}, {:.0}) color {} opacity {:.1}",
            pin.province(),
            pos.x,
            pos.y,
            pin.color().to_hex(),
            opacity
        );
    }

    // A visited province with notes opens its detail surface.
    page.handle_event(
        PointerEvent::Click {
            province: ProvinceId::from("HoChiMinh"),
            position: Point::new(490.0, 650.0),
        },
        Instant::now(),
    );
    println!("detail open: {:?}", page.open_detail());

    println!("final: {:?}", page.stats());
    Ok(())
}
