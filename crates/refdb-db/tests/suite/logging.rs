use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use refdb_db::{Class, Database, NameRef};
use tracing::{field::Visit, Event};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

#[derive(Debug, Clone)]
struct CapturedEvent {
    target: String,
    fields: HashMap<String, String>,
}

#[derive(Clone)]
struct CapturingLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CapturingLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            target: event.metadata().target().to_string(),
            fields: visitor.fields,
        };
        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(captured);
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

#[test]
fn database_events_use_the_crate_target() {
    let events = Arc::new(Mutex::new(Vec::<CapturedEvent>::new()));
    let layer = CapturingLayer {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut a = Database::new();
    a.add_base_type_primitives();

    let mut b = Database::new();
    let foo = b.name("Foo");
    b.add_primitive(Class::new(foo, NameRef::GLOBAL, NameRef::NONE, 8));
    a.merge(&b);
    a.merge_unique(&b);

    let events = events.lock().expect("events mutex poisoned");
    let messages: Vec<&str> = events
        .iter()
        .filter(|event| event.target == "refdb.db")
        .filter_map(|event| event.fields.get("message").map(String::as_str))
        .collect();
    assert_eq!(
        messages,
        vec![
            "registered base type primitives",
            "merged database",
            "merged database without duplicates",
        ],
        "captured: {events:?}"
    );

    for event in events.iter() {
        assert!(
            !event.fields.contains_key("target"),
            "target recorded as a field: {event:?}"
        );
    }

    let unique = events
        .iter()
        .find(|event| {
            event.fields.get("message").map(String::as_str)
                == Some("merged database without duplicates")
        })
        .expect("merge_unique event");
    assert_eq!(unique.fields.get("added").map(String::as_str), Some("0"));
    assert_eq!(unique.fields.get("skipped").map(String::as_str), Some("1"));
}
