//! End-to-end behaviour on representative inputs.

use tempex::{
    annotate_dates, classify, AnnotationKind, Interval, Method, Relation, SignalKind, SignalTable,
    TemporalAnnotator,
};

const REF: &str = "2020-01-01";

// =============================================================================
// Date matching
// =============================================================================

#[test]
fn dmy_mention_is_a_point() {
    let dates = annotate_dates("12 March 2001");
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].span.start, 0);
    assert_eq!(dates[0].span.end, 13);
    assert_eq!(dates[0].method, Method::Textual);
    assert_eq!(dates[0].interval.start.to_string(), "2001-03-12");
    assert_eq!(dates[0].interval.end.to_string(), "2001-03-12");
}

#[test]
fn year_range_widens_to_whole_years() {
    let dates = annotate_dates("2003–2005");
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].interval.start.to_string(), "2003-01-01");
    assert_eq!(dates[0].interval.end.to_string(), "2005-12-31");
}

#[test]
fn single_textual_mention_in_context() {
    for (text, mention) in [
        ("The album came out on 4 July 1999 in Europe.", "4 July 1999"),
        ("Filming ran 2003, March 20–May 22 in Prague.", "2003, March 20–May 22"),
        ("It premiered March 20, 2003, to acclaim.", "March 20, 2003"),
        ("Released in February 2004 worldwide.", "February 2004"),
        ("Term: 24 May 2001 – 2008", "24 May 2001 – 2008"),
    ] {
        let dates = annotate_dates(text);
        assert_eq!(dates.len(), 1, "{text}");
        assert_eq!(dates[0].text, mention);
        assert_eq!(dates[0].span.extract(text), mention);
    }
}

#[test]
fn malformed_fragments_are_ignored() {
    assert!(annotate_dates("on 45 Smarch 2001").iter().all(|d| d.text == "2001"));
    assert!(annotate_dates("call 555-1234").is_empty());
    assert!(annotate_dates("").is_empty());
}

// =============================================================================
// Signals
// =============================================================================

#[test]
fn bracketing_duration_nests_both_dates() {
    let table = SignalTable::parse("from ... to || DURATION").unwrap();
    let annotator = TemporalAnnotator::new(table);
    let result = annotator.annotate("from 1990 to 1995", REF).unwrap();

    assert_eq!(result.explicit.len(), 1);
    let expr = &result.explicit[0];
    assert_eq!(expr.signal, SignalKind::Duration);
    assert_eq!(expr.nested_date_ids, vec![0, 1]);
    assert_eq!(expr.timespan.start.to_string(), "1990-01-01");
    assert_eq!(expr.timespan.end.to_string(), "1995-12-31");

    let explicit = result
        .annotations
        .iter()
        .find(|a| a.kind == AnnotationKind::Explicit)
        .unwrap();
    assert_eq!(explicit.nest, vec![0, 1]);
}

#[test]
fn every_date_gets_exactly_one_expression() {
    let text = "Born 3 May 1950, he served after 1975 and retired in 1999.";
    let result = TemporalAnnotator::default().annotate(text, REF).unwrap();
    assert_eq!(result.dates.len(), 3);
    assert_eq!(result.explicit.len(), 3);
    let signals: Vec<_> = result.explicit.iter().map(|e| e.signal).collect();
    assert_eq!(
        signals,
        vec![SignalKind::None, SignalKind::After, SignalKind::Overlap]
    );
}

#[test]
fn annotation_ids_are_sequential() {
    let text = "The second tour ran from 1990 to 1995, the fifth since 2001.";
    let result = TemporalAnnotator::default().annotate(text, REF).unwrap();
    for (idx, a) in result.annotations.iter().enumerate() {
        assert_eq!(a.id, idx);
        assert!(a.nest.iter().all(|&n| n < a.id));
    }
    assert_eq!(result.ordinals.len(), 2);
}

#[test]
fn annotate_is_idempotent() {
    let annotator = TemporalAnnotator::default();
    let text = "Between 1914 and 1918, during 1916, and until 12 March 1920.";
    let first = annotator.annotate(text, REF).unwrap();
    let second = annotator.annotate(text, REF).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn json_output_uses_labels() {
    let result = TemporalAnnotator::default()
        .annotate("before 2001", REF)
        .unwrap();
    let json = result.to_json().unwrap();
    assert!(json.contains("\"BEFORE\""));
    assert!(json.contains("\"2001-01-01\""));
    assert!(json.contains("\"reference_date\": \"2020-01-01\""));
}

// =============================================================================
// Reasoning
// =============================================================================

#[test]
fn two_years_apart_is_before() {
    let r = classify(Interval::new(20010101, 20011231), Interval::new(20030101, 20031231));
    assert_eq!(r, Relation::Before);
}

#[test]
fn six_years_apart_is_none() {
    let r = classify(Interval::new(19990101, 19991231), Interval::new(20050101, 20051231));
    assert_eq!(r, Relation::None);
}

#[test]
fn day_inside_year_overlaps() {
    let r = classify(Interval::new(20000101, 20001231), Interval::new(20000601, 20000601));
    assert_eq!(r, Relation::Overlap);
    assert_eq!(r.as_phrase(), Some("during"));
}

#[test]
fn relation_between_annotated_facts() {
    let annotator = TemporalAnnotator::default();
    let main = annotator.annotate("He was born in 1980.", REF).unwrap();
    let constraint = annotator.annotate("The war lasted from 1975 to 1985.", REF).unwrap();
    let r = classify(main.intervals()[0], constraint.intervals()[0]);
    assert_eq!(r, Relation::Overlap);
}
