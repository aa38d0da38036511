#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp2c::{BitOrder, CSourceOptions, ConvertRequest, Limits, Options};

fuzz_target!(|data: &[u8]| {
    // Bound allocations so adversarial headers fail cleanly instead of OOMing
    let limits = Limits {
        max_memory_bytes: Some(16 << 20),
        ..Default::default()
    };
    for bit_order in [BitOrder::MsbFirst, BitOrder::LsbFirst] {
        let options = Options {
            bit_order,
            include_palette: true,
        };
        // Must never panic
        if let Ok(conv) = ConvertRequest::new(options)
            .with_limits(&limits)
            .convert_bytes(data, enough::Unstoppable)
        {
            let _ = zenbmp2c::emit::render_c_source(&conv, &CSourceOptions::default());
        }
    }
});
