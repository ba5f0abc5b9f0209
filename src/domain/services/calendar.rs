use chrono::NaiveDate;
use std::collections::HashMap;
use crate::domain::models::booking::ServiceBookingWindow;
use crate::domain::models::calendar::{CalendarDateAvailability, BOOKED_REASON};
use crate::domain::models::inventory::DailyInventoryRecord;
use crate::domain::models::service::{Service, ServiceKind};
use crate::domain::models::unavailable_block::UnavailableDateBlock;

/// Projects bookings, blocks and inventory onto one entry per day of
/// `[start, end]` (inclusive), as consumed by the date range selector.
pub fn build_calendar(
    service: &Service,
    start: NaiveDate,
    end: NaiveDate,
    bookings: &[ServiceBookingWindow],
    blocks: &[UnavailableDateBlock],
    inventory: &[DailyInventoryRecord],
) -> Vec<CalendarDateAvailability> {
    let kind = service.kind();
    let capacity_by_date: HashMap<NaiveDate, i32> = inventory.iter()
        .filter(|r| r.room_type_id == service.id)
        .map(|r| (r.date, r.available))
        .collect();

    let mut days = Vec::new();
    let mut current = start;

    while current <= end {
        let occupying: Vec<&ServiceBookingWindow> = bookings.iter()
            .filter(|b| b.service_id == service.id && b.status.is_active() && b.occupies(current))
            .collect();

        let (occupancy, is_full) = match &kind {
            ServiceKind::Property { total_inventory } => {
                let capacity = capacity_by_date.get(&current).copied().unwrap_or(*total_inventory);
                let committed: i32 = occupying.iter().map(|b| b.units).sum();
                (occupancy_percent(committed, capacity), capacity - committed < 1)
            }
            ServiceKind::Tour { slots } if !slots.is_empty() => {
                let taken = slots.iter()
                    .filter(|slot| occupying.iter().any(|b| b.time_slot.as_deref() == Some(slot.as_str())))
                    .count();
                (occupancy_percent(taken as i32, slots.len() as i32), taken >= slots.len())
            }
            ServiceKind::Vehicle | ServiceKind::Tour { .. } => {
                let taken = !occupying.is_empty();
                (if taken { 100 } else { 0 }, taken)
            }
        };

        let mut entry = if let Some(block) = blocks.iter().find(|b| b.service_id == service.id && b.covers(current)) {
            CalendarDateAvailability::unavailable(current, block.display_reason())
        } else if is_full {
            CalendarDateAvailability::unavailable(current, BOOKED_REASON)
        } else {
            let mut day = CalendarDateAvailability::available(current);
            day.price = service.base_price;
            day
        };
        entry.occupancy_percent = Some(occupancy);

        days.push(entry);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

fn occupancy_percent(committed: i32, capacity: i32) -> u8 {
    if capacity <= 0 {
        return 100;
    }
    (i64::from(committed.max(0)) * 100 / i64::from(capacity)).clamp(0, 100) as u8
}
