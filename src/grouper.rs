use indexmap::IndexMap;
use tracing::debug;

use crate::{Count, OrderRecord, Orders};

/// Number of blank rows around every subtotal row
const SPACER_ROWS: usize = 2;

/// Options changing the order of groups and their members
///
/// The default keeps everything in the order of the input.
#[derive(Clone, Debug, Default)]
pub struct GroupOptions {
    /// Teachers whose groups should come first, in this order
    pub teacher_order: Vec<String>,
    /// Sort the members of each group by first and last name
    pub sort_by_name: bool,
}

/// The summed up orders of one class
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSummary {
    pub teacher: String,
    pub item_counts: Vec<Count>,
}

/// All orders of one class
#[derive(Clone, Debug)]
pub struct Group<'o> {
    pub members: Vec<&'o OrderRecord>,
    pub summary: GroupSummary,
}

impl<'o> Group<'o> {
    fn new(teacher: &str, width: usize) -> Self {
        Self {
            members: Vec::new(),
            summary: GroupSummary {
                teacher: teacher.to_string(),
                item_counts: vec![Count::ZERO; width],
            },
        }
    }

    fn add(&mut self, record: &'o OrderRecord) {
        for (total, count) in self.summary.item_counts.iter_mut().zip(&record.item_counts) {
            *total += *count;
        }
        self.members.push(record);
    }
}

/// One row of a grouped report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportRow<'r> {
    /// The order of a single student
    Order(&'r OrderRecord),
    /// A row without any content
    Spacer,
    /// The total orders of a class
    Subtotal(&'r GroupSummary),
}

/// Groups orders by teacher
///
/// Groups appear in the order their teacher first appears in the input,
/// unless [`GroupOptions::teacher_order`] moves them to the front.
/// Teachers are compared after trimming, but case sensitive.
pub fn group<'o>(orders: &'o Orders, options: &GroupOptions) -> Vec<Group<'o>> {
    let width = orders.items().len();
    let mut groups: IndexMap<&'o str, Group<'o>> = IndexMap::new();

    for record in orders.records() {
        let teacher = record.teacher.trim();
        groups
            .entry(teacher)
            .or_insert_with(|| Group::new(teacher, width))
            .add(record);
    }

    if !options.teacher_order.is_empty() {
        let rank = |teacher: &str| {
            options.teacher_order
                .iter()
                .position(|preferred| preferred.trim() == teacher)
                .unwrap_or(options.teacher_order.len())
        };
        groups.sort_by(|a, _, b, _| rank(*a).cmp(&rank(*b)));
    }
    debug!(groups = groups.len(), "grouped orders by teacher");

    groups
        .into_values()
        .map(|mut group| {
            if options.sort_by_name {
                group.members.sort_by(|a, b| {
                    (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name))
                });
            }
            group
        })
        .collect()
}

/// Lays groups out as report rows
///
/// Every group is followed by two spacer rows and its subtotal row.
/// Two further spacer rows separate a subtotal from the next group.
pub fn rows<'r>(groups: &'r [Group<'_>]) -> Vec<ReportRow<'r>> {
    let mut rows = Vec::new();

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            rows.extend([ReportRow::Spacer; SPACER_ROWS]);
        }
        rows.extend(group.members.iter().map(|record| ReportRow::Order(*record)));
        rows.extend([ReportRow::Spacer; SPACER_ROWS]);
        rows.push(ReportRow::Subtotal(&group.summary));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first_name: &str, teacher: &str, item_counts: &[u64]) -> OrderRecord {
        OrderRecord {
            first_name: first_name.to_string(),
            last_name: String::new(),
            teacher: teacher.to_string(),
            item_counts: item_counts.iter().copied().map(Count::new).collect(),
            payment: "Online".to_string(),
        }
    }

    fn orders(records: Vec<OrderRecord>) -> Orders {
        Orders::new(vec!["Cheese".to_string(), "Pepperoni".to_string()], records)
    }

    fn teachers(groups: &[Group]) -> Vec<String> {
        groups.iter().map(|group| group.summary.teacher.clone()).collect()
    }

    fn members(group: &Group) -> Vec<String> {
        group.members.iter().map(|record| record.first_name.clone()).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let orders = orders(vec![
            record("Nick", "Frazzle", &[1, 1]),
            record("Bob", "Frizzle", &[2, 0]),
            record("Richard", "Frazzle", &[0, 3]),
        ]);
        let groups = group(&orders, &GroupOptions::default());

        assert_eq!(teachers(&groups), ["Frazzle", "Frizzle"]);
        assert_eq!(members(&groups[0]), ["Nick", "Richard"]);
        assert_eq!(members(&groups[1]), ["Bob"]);
    }

    #[test]
    fn subtotals_sum_exactly_the_members() {
        let orders = orders(vec![
            record("Nick", "Frazzle", &[1, 1]),
            record("Bob", "Frizzle", &[2, 0]),
            record("Richard", "Frazzle", &[0, 3]),
        ]);
        let groups = group(&orders, &GroupOptions::default());

        for group in &groups {
            for item in 0..orders.items().len() {
                let expected: Count = group.members
                    .iter()
                    .map(|record| record.item_counts[item])
                    .sum();
                assert_eq!(group.summary.item_counts[item], expected);
            }
        }
        assert_eq!(groups[0].summary.item_counts, [Count::new(1), Count::new(4)]);
        assert_eq!(groups[1].summary.item_counts, [Count::new(2), Count::ZERO]);
    }

    #[test]
    fn no_record_is_lost_or_duplicated() {
        let orders = orders(vec![
            record("A", "Frazzle", &[1, 0]),
            record("B", "", &[0, 1]),
            record("C", "Frizzle", &[1, 1]),
            record("D", "Frazzle", &[0, 0]),
            record("E", "", &[2, 0]),
        ]);
        let groups = group(&orders, &GroupOptions::default());

        let mut grouped = groups
            .iter()
            .flat_map(|group| group.members.iter().map(|r| (&r.first_name, &r.teacher)))
            .collect::<Vec<_>>();
        let mut input = orders.records()
            .iter()
            .map(|r| (&r.first_name, &r.teacher))
            .collect::<Vec<_>>();
        grouped.sort();
        input.sort();
        assert_eq!(grouped, input);
    }

    #[test]
    fn blank_teacher_is_its_own_group() {
        let orders = orders(vec![
            record("Nick", "Frazzle", &[1, 0]),
            record("Bob", "", &[0, 1]),
            record("Richard", "  ", &[1, 0]),
        ]);
        let groups = group(&orders, &GroupOptions::default());

        assert_eq!(teachers(&groups), ["Frazzle", ""]);
        assert_eq!(members(&groups[1]), ["Bob", "Richard"]);
    }

    #[test]
    fn teachers_are_trimmed_but_case_sensitive() {
        let orders = orders(vec![
            record("Nick", "Frazzle", &[1, 0]),
            record("Bob", " Frazzle ", &[1, 0]),
            record("Richard", "frazzle", &[1, 0]),
        ]);
        let groups = group(&orders, &GroupOptions::default());

        assert_eq!(teachers(&groups), ["Frazzle", "frazzle"]);
        assert_eq!(groups[0].summary.item_counts[0], Count::new(2));
    }

    #[test]
    fn preferred_teachers_come_first() {
        let orders = orders(vec![
            record("A", "Frazzle", &[1, 0]),
            record("B", "Frizzle", &[1, 0]),
            record("C", "Fuzzle", &[1, 0]),
            record("D", "Fizzle", &[1, 0]),
        ]);
        let options = GroupOptions {
            teacher_order: vec!["Fuzzle".to_string(), "Nobody".to_string(), "Frizzle".to_string()],
            sort_by_name: false,
        };
        let groups = group(&orders, &options);

        assert_eq!(teachers(&groups), ["Fuzzle", "Frizzle", "Frazzle", "Fizzle"]);
    }

    #[test]
    fn members_sorted_by_name() {
        let mut richard = record("Richard", "Frazzle", &[0, 3]);
        richard.last_name = "Nixon".to_string();
        let mut nick = record("Nick", "Frazzle", &[1, 1]);
        nick.last_name = "Carter".to_string();
        let mut richard_b = record("Richard", "Frazzle", &[1, 0]);
        richard_b.last_name = "Burton".to_string();
        let orders = orders(vec![richard, nick, richard_b]);
        let options = GroupOptions { sort_by_name: true, ..GroupOptions::default() };
        let groups = group(&orders, &options);

        let names = groups[0].members
            .iter()
            .map(|r| format!("{} {}", r.first_name, r.last_name))
            .collect::<Vec<_>>();
        assert_eq!(names, ["Nick Carter", "Richard Burton", "Richard Nixon"]);
        assert_eq!(groups[0].summary.item_counts, [Count::new(2), Count::new(4)]);
    }

    #[test]
    fn spacers_surround_subtotals() {
        let orders = orders(vec![
            record("Nick", "Frazzle", &[1, 1]),
            record("Bob", "Frizzle", &[2, 0]),
        ]);
        let groups = group(&orders, &GroupOptions::default());
        let rows = rows(&groups);

        let records = orders.records();
        assert_eq!(rows, [
            ReportRow::Order(&records[0]),
            ReportRow::Spacer,
            ReportRow::Spacer,
            ReportRow::Subtotal(&groups[0].summary),
            ReportRow::Spacer,
            ReportRow::Spacer,
            ReportRow::Order(&records[1]),
            ReportRow::Spacer,
            ReportRow::Spacer,
            ReportRow::Subtotal(&groups[1].summary),
        ]);
    }

    #[test]
    fn no_orders_no_rows() {
        let orders = orders(Vec::new());
        let groups = group(&orders, &GroupOptions::default());

        assert!(groups.is_empty());
        assert!(rows(&groups).is_empty());
    }
}
