#![no_main]
use flatcsv::{Delimiter, LineEnding, Options, encode_json};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(s) {
            let opts = Options::default();
            let a = encode_json(&json_value, &opts);
            assert_eq!(a, encode_json(&json_value, &opts));

            let shallow = Options::default().with_flatten(false);
            let _ = encode_json(&json_value, &shallow);

            let mut opts_pipe = Options::default();
            opts_pipe.delimiter = Delimiter::Pipe;
            opts_pipe.line_ending = LineEnding::CrLf;
            opts_pipe.null_as_empty = false;
            let _ = encode_json(&json_value, &opts_pipe);
        }
    }
});
