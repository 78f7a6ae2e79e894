/*!
 * Unit tests for region partitioning
 */

use crate::common::region_from;
use simplyread::partitioner::partition;

#[test]
fn test_partition_shouldEnumerateUnitsInDocumentOrder() {
    let region = region_from(
        "<html><body><article><h2>Heading</h2><p>First body text.</p>\
         <blockquote>Quoted remark.</blockquote><p>Closing line.</p></article></body></html>",
    );
    let units = partition(&region);

    let texts: Vec<&str> = units.iter().map(|u| u.original.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Heading", "First body text.", "Quoted remark.", "Closing line."]
    );
    let indices: Vec<usize> = units.iter().map(|u| u.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn test_partition_shouldSplitMixedInlineContentIntoLeafUnits() {
    let region = region_from(
        "<html><body><article><p>Hello <em>brave</em> new world</p></article></body></html>",
    );
    let units = partition(&region);

    let texts: Vec<&str> = units.iter().map(|u| u.original.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "brave", "new world"]);
}

#[test]
fn test_partition_shouldSkipWhitespaceAndBareAccidentals() {
    let region = region_from(
        "<html><body><article><p>Real sentence here.</p><p>   </p><p>!</p><p>ok</p></article></body></html>",
    );
    let units = partition(&region);

    let texts: Vec<&str> = units.iter().map(|u| u.original.as_str()).collect();
    assert_eq!(texts, vec!["Real sentence here.", "ok"]);
}

#[test]
fn test_partition_shouldStartUnitsUntranslated() {
    let region = region_from("<html><body><article><p>Original text.</p></article></body></html>");
    let units = partition(&region);

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].current, units[0].original);
    assert!(!units[0].is_translated());
}

#[test]
fn test_partition_shouldBeStableAcrossRepeatedCalls() {
    let region = region_from(
        "<html><body><article><p>One thing.</p><p>Another thing.</p></article></body></html>",
    );
    let first = partition(&region);
    let second = partition(&region);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.original, b.original);
    }
}
