use criterion::{black_box, criterion_group, criterion_main, Criterion};
use json_tree::{parse, JsonArray, JsonObject, Serializer, Value};

// A sample "medium" JSON document.
const MEDIUM_JSON: &str = r#"
{
    "name": "Babbage",
    "age": 30,
    "admin": true,
    "friends": ["Ada", "Charles", "Grace"],
    "tasks": [
        { "id": 1, "title": "Parse JSON", "done": false },
        { "id": 2, "title": "Write docs", "done": true }
    ],
    "nested": {"key": [null, 1, 1.5]}
}
"#;

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("JSON Parsing");

    group.bench_function("json_tree::parse", |b| {
        b.iter(|| {
            let _ = parse(black_box(MEDIUM_JSON)).unwrap();
        })
    });

    group.bench_function("serde_json::from_str", |b| {
        b.iter(|| {
            let _: serde_json::Value = serde_json::from_str(black_box(MEDIUM_JSON)).unwrap();
        })
    });

    group.finish();
}

fn bench_serializing(c: &mut Criterion) {
    // Build the native value tree.
    let mut obj = JsonObject::new();
    obj.insert("key", Value::Str("value".to_string()));
    let mut items = JsonArray::new();
    items.append(Value::Int(1));
    items.append(Value::Null);
    obj.insert("items", Value::Array(items));
    let my_value = Value::Object(obj);
    let serializer = Serializer::new();

    // Build the equivalent serde_json::Value.
    let mut serde_map = serde_json::Map::new();
    serde_map.insert(
        "key".to_string(),
        serde_json::Value::String("value".to_string()),
    );
    serde_map.insert(
        "items".to_string(),
        serde_json::Value::Array(vec![
            serde_json::Value::Number(serde_json::Number::from(1)),
            serde_json::Value::Null,
        ]),
    );
    let serde_value = serde_json::Value::Object(serde_map);

    let mut group = c.benchmark_group("JSON Serialize");

    group.bench_function("json_tree::Serializer", |b| {
        b.iter(|| {
            let _ = serializer.serialize(black_box(&my_value)).unwrap();
        })
    });

    group.bench_function("serde_json::to_string", |b| {
        b.iter(|| {
            let _ = serde_json::to_string(black_box(&serde_value)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_serializing);
criterion_main!(benches);
