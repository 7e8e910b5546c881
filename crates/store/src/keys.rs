/// The keys the application reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Bookings,
    ChatMessages,
    ChatReadState,
    AdminNotifications,
    AdminSettings,
    Testimonials,
    AdminOnlineStatus,
    ChatUser,
}

impl CollectionKey {
    pub const ALL: [Self; 8] = [
        Self::Bookings,
        Self::ChatMessages,
        Self::ChatReadState,
        Self::AdminNotifications,
        Self::AdminSettings,
        Self::Testimonials,
        Self::AdminOnlineStatus,
        Self::ChatUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bookings => "bookings",
            Self::ChatMessages => "chatMessages",
            Self::ChatReadState => "chatReadState",
            Self::AdminNotifications => "adminNotifications",
            Self::AdminSettings => "adminSettings",
            Self::Testimonials => "testimonials",
            Self::AdminOnlineStatus => "adminOnlineStatus",
            Self::ChatUser => "chatUser",
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
