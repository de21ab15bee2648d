//! The session reducer.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, trace, warn};

use super::channel::{Channel, ChannelStatus, Query};
use super::journal::Journal;
use super::user::{PeerTable, User, UserId};
use super::{ConnectionState, SessionConfig, SessionEvent};
use crate::casemap::CaseMapping;
use crate::error::ProtocolError;
use crate::factory::MessageFactory;
use crate::isupport::{ModeKind, ServerSupport};
use crate::message::{
    self, CommandMessage, ErrorMessage, Message, MessageBody, NamesReply, NumericMessage,
    WhoReply,
};
use crate::mode::{ModeAction, ModeChangeSet};
use crate::prefix::Prefix;

/// Client-side view of one IRC connection.
///
/// Apply messages strictly in arrival order. Names are compared under the
/// server's case mapping, which starts as `rfc1459` and follows
/// `CASEMAPPING` once advertised.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    state: ConnectionState,
    me: UserId,
    server_name: Option<String>,
    support: ServerSupport,
    users: PeerTable,
    channels: HashMap<String, Channel>,
    queries: HashMap<UserId, Query>,
    server_journal: Journal,
}

impl Session {
    /// Create a session for the given configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let support = ServerSupport::new();
        let mut users = PeerTable::new();
        let me = users.ensure(&config.nickname, support.casemapping);
        if let Some(user) = users.get_mut(me) {
            user.username = Some(config.username.clone());
            user.realname = Some(config.realname.clone());
        }
        let server_journal = Journal::new(config.journal_capacity);
        Session {
            config,
            state: ConnectionState::Disconnected,
            me,
            server_name: None,
            support,
            users,
            channels: HashMap::new(),
            queries: HashMap::new(),
            server_journal,
        }
    }

    /// Begin registration. Returns the messages to send: PASS (when a
    /// password is configured), NICK and USER.
    #[must_use]
    pub fn start(&mut self) -> Vec<Message> {
        self.state = ConnectionState::Registering;
        debug!(nickname = %self.config.nickname, "starting registration");

        let mut messages = Vec::with_capacity(3);
        if let Some(password) = &self.config.password {
            messages.push(Message::new(CommandMessage::Pass(message::Pass {
                password: password.clone(),
            })));
        }
        messages.push(Message::nick(self.config.nickname.clone()));
        messages.push(Message::new(CommandMessage::User(message::User {
            username: self.config.username.clone(),
            mode: "0".to_owned(),
            realname: self.config.realname.clone(),
        })));
        messages
    }

    /// Classify one raw line and apply it. On a parse error the session is
    /// left untouched.
    pub fn feed_line(
        &mut self,
        factory: &MessageFactory,
        raw: &str,
    ) -> Result<Vec<SessionEvent>, ProtocolError> {
        let message = factory.classify_and_parse(raw)?;
        Ok(self.apply(&message))
    }

    /// Apply one message and journal it.
    pub fn apply(&mut self, message: &Message) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.note_sender(message.prefix.as_ref());
        match &message.body {
            MessageBody::Command(command) => self.apply_command(message, command, &mut events),
            MessageBody::Numeric(numeric) => self.apply_numeric(message, numeric, &mut events),
            MessageBody::Ctcp(_) | MessageBody::Custom(_) => {}
        }
        self.record(message, &mut events);
        events
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the registration burst is over.
    pub fn is_ready(&self) -> bool {
        self.state == ConnectionState::Ready
    }

    /// The client's current nickname.
    pub fn nickname(&self) -> &str {
        self.users
            .get(self.me)
            .map_or(self.config.nickname.as_str(), |u| u.nickname.as_str())
    }

    /// Handle of the client's own [`User`].
    pub fn me(&self) -> UserId {
        self.me
    }

    pub fn own_user(&self) -> Option<&User> {
        self.users.get(self.me)
    }

    /// Whether `nickname` is the client's own.
    pub fn is_self(&self, nickname: &str) -> bool {
        self.support.names_eq(nickname, self.nickname())
    }

    /// Server name learned from the welcome reply.
    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }

    pub fn support(&self) -> &ServerSupport {
        &self.support
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&self.support.fold(name))
    }

    /// Every channel ever joined, open or not.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.channels.values()
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_id(&self, nickname: &str) -> Option<UserId> {
        self.users.find(nickname, self.casemap())
    }

    pub fn user_by_nick(&self, nickname: &str) -> Option<&User> {
        self.user_id(nickname).and_then(|id| self.users.get(id))
    }

    /// Every known user, the client included.
    pub fn users(&self) -> impl Iterator<Item = (UserId, &User)> + '_ {
        self.users.iter()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Query with the user currently holding `nickname`, or with a peer
    /// last seen under it.
    pub fn query(&self, nickname: &str) -> Option<&Query> {
        self.user_id(nickname)
            .and_then(|id| self.queries.get(&id))
            .or_else(|| self.detached_query(nickname).and_then(|id| self.queries.get(&id)))
    }

    pub fn queries(&self) -> impl Iterator<Item = &Query> + '_ {
        self.queries.values()
    }

    /// Messages that belong to no channel or query.
    pub fn server_journal(&self) -> &Journal {
        &self.server_journal
    }

    fn casemap(&self) -> CaseMapping {
        self.support.casemapping
    }

    fn note_sender(&mut self, prefix: Option<&Prefix>) {
        let Some(prefix) = prefix else {
            return;
        };
        let Some(nick) = prefix.nick() else {
            return;
        };
        if let Some(id) = self.users.find(nick, self.casemap()) {
            if let Some(user) = self.users.get_mut(id) {
                user.update_from_prefix(prefix);
            }
        }
    }

    fn apply_command(
        &mut self,
        message: &Message,
        command: &CommandMessage,
        events: &mut Vec<SessionEvent>,
    ) {
        let source = message.source_nickname();
        match command {
            CommandMessage::Join(join) => {
                if let Some(nick) = source {
                    for channel in &join.channels {
                        self.on_join(nick, channel, events);
                    }
                    self.note_sender(message.prefix.as_ref());
                }
            }
            CommandMessage::Part(part) => {
                if let Some(nick) = source {
                    for channel in &part.channels {
                        self.on_part(nick, channel, part.reason.as_deref(), events);
                    }
                }
            }
            CommandMessage::Quit(quit) => {
                if let Some(nick) = source {
                    self.on_quit(nick, quit.reason.as_deref(), events);
                }
            }
            CommandMessage::Kill(kill) => {
                self.on_quit(&kill.nickname, Some(kill.reason.as_str()), events);
            }
            CommandMessage::Kick(kick) => {
                for (channel, nick) in kick.pairs() {
                    self.on_kick(channel, nick, source, kick.reason.as_deref(), events);
                }
            }
            CommandMessage::Nick(nick) => {
                if let Some(old) = source {
                    self.on_nick(old, &nick.nickname, events);
                }
            }
            CommandMessage::Topic(topic) => {
                if let Some(text) = &topic.topic {
                    let setter = message
                        .prefix
                        .as_ref()
                        .map(|p| p.name().to_owned());
                    self.set_topic(&topic.channel, Some(text), setter, events);
                }
            }
            CommandMessage::ChannelMode(mode) => {
                let changes = mode.changes(&self.support);
                self.apply_channel_modes(&mode.channel, &changes, false, events);
            }
            CommandMessage::UserMode(mode) => {
                if self.is_self(&mode.nickname) {
                    let changes = mode.changes();
                    if let Some(me) = self.users.get_mut(self.me) {
                        me.apply_modes(&changes);
                    }
                    events.push(SessionEvent::ModesChanged {
                        target: mode.nickname.clone(),
                        changes,
                    });
                }
            }
            CommandMessage::Away(away) => {
                if let Some(nick) = source {
                    self.set_away(nick, true, Some(&away.message), events);
                }
            }
            CommandMessage::Back(_) => {
                if let Some(nick) = source {
                    self.set_away(nick, false, None, events);
                }
            }
            CommandMessage::Ping(ping) => {
                trace!(token = %ping.token, "answering PING");
                events.push(SessionEvent::Send(Box::new(Message::pong(ping.token.clone()))));
            }
            CommandMessage::Error(error) => {
                warn!(message = %error.message, "server closed the connection");
                self.state = ConnectionState::Terminated;
            }
            _ => {}
        }
    }

    fn apply_numeric(
        &mut self,
        message: &Message,
        numeric: &NumericMessage,
        events: &mut Vec<SessionEvent>,
    ) {
        match numeric {
            NumericMessage::Welcome(welcome) => {
                self.server_name = message.prefix.as_ref().map(|p| p.name().to_owned());
                if !welcome.target.is_empty() && !self.is_self(&welcome.target) {
                    let old = self.nickname().to_owned();
                    self.on_nick(&old, &welcome.target, events);
                }
                self.state = ConnectionState::Registered;
                debug!(nickname = %self.nickname(), server = ?self.server_name, "registered");
            }
            NumericMessage::Support(reply) => {
                let before = self.casemap();
                reply.apply_to(&mut self.support);
                if self.casemap() != before {
                    self.rekey();
                }
                events.push(SessionEvent::SupportUpdated);
            }
            NumericMessage::UserModeIs(reply) => {
                if let Some(me) = self.users.get_mut(self.me) {
                    me.set_modes(&reply.changes());
                }
            }
            NumericMessage::UserAway(reply) => {
                self.set_away(&reply.nickname, true, reply.text.as_deref(), events);
            }
            NumericMessage::SelfUnaway(_) => {
                let nick = self.nickname().to_owned();
                self.set_away(&nick, false, None, events);
            }
            NumericMessage::SelfAway(_) => {
                let nick = self.nickname().to_owned();
                self.set_away(&nick, true, None, events);
            }
            NumericMessage::WhoisUser(reply) => {
                if let Some(user) = self.known_user_mut(&reply.nickname) {
                    user.username = Some(reply.username.clone());
                    user.host = Some(reply.host.clone());
                    user.realname = Some(reply.realname.clone());
                }
            }
            NumericMessage::WhoisServer(reply) => {
                if let Some(user) = self.known_user_mut(&reply.nickname) {
                    user.server = Some(reply.server.clone());
                }
            }
            NumericMessage::ChannelModeIs(reply) => {
                let changes = reply.changes(&self.support);
                self.apply_channel_modes(&reply.channel, &changes, true, events);
            }
            NumericMessage::CreationTime(reply) => {
                if let Some(channel) = self.channel_mut(&reply.channel) {
                    channel.created = Some(reply.created);
                }
            }
            NumericMessage::NoTopic(reply) => {
                self.set_topic(&reply.channel, None, None, events);
            }
            NumericMessage::TopicReply(reply) => {
                self.set_topic(&reply.channel, reply.text.as_deref(), None, events);
            }
            NumericMessage::TopicSetBy(reply) => {
                if let Some(channel) = self.channel_mut(&reply.channel) {
                    channel.topic_setter = Some(reply.setter.clone());
                    channel.topic_set_time = Some(reply.time);
                }
            }
            NumericMessage::WhoReply(reply) => self.on_who_reply(reply),
            NumericMessage::NamesReply(reply) => self.on_names_reply(reply),
            NumericMessage::Error(ErrorMessage::NoSuchNick(reply)) => {
                self.on_no_such_nick(&reply.nickname, events);
            }
            NumericMessage::Error(ErrorMessage::NoSuchChannel(reply)) => {
                self.close_channel(&reply.channel, events);
            }
            _ => {}
        }
        self.check_ready(numeric, events);
    }

    fn check_ready(&mut self, numeric: &NumericMessage, events: &mut Vec<SessionEvent>) {
        if self.state == ConnectionState::Registered && !numeric.is_direct() {
            debug!("registration burst complete");
            self.state = ConnectionState::Ready;
            events.push(SessionEvent::Ready);
        }
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        let key = self.support.fold(name);
        self.channels.get_mut(&key)
    }

    fn known_user_mut(&mut self, nickname: &str) -> Option<&mut User> {
        let id = self.users.find(nickname, self.casemap())?;
        self.users.get_mut(id)
    }

    fn on_join(&mut self, nick: &str, name: &str, events: &mut Vec<SessionEvent>) {
        let casemap = self.casemap();
        let key = self.support.fold(name);

        let is_self = self.is_self(nick);
        let capacity = self.config.journal_capacity;
        let channel = self
            .channels
            .entry(key)
            .or_insert_with(|| Channel::new(name, capacity));

        if is_self {
            if !channel.open {
                // Roster seen from outside is stale; the join burst resends it.
                channel.members.clear();
                channel.open = true;
            }
            channel.members.insert(self.me, ChannelStatus::new());
            debug!(channel = name, "joined channel");
        } else {
            let id = self.users.ensure(nick, casemap);
            channel.members.entry(id).or_default();
            trace!(channel = name, nick, open = channel.open, "user joined");
            self.reattach_query(id, nick);
        }

        events.push(SessionEvent::Joined {
            channel: name.to_owned(),
            nickname: nick.to_owned(),
        });
    }

    fn on_part(
        &mut self,
        nick: &str,
        name: &str,
        reason: Option<&str>,
        events: &mut Vec<SessionEvent>,
    ) {
        if self.is_self(nick) {
            if self.channel(name).is_some_and(|c| c.open) {
                events.push(SessionEvent::Parted {
                    channel: name.to_owned(),
                    nickname: nick.to_owned(),
                    reason: reason.map(str::to_owned),
                });
                self.close_channel(name, events);
            }
            return;
        }

        let Some(id) = self.users.find(nick, self.casemap()) else {
            trace!(nick, "part from unknown user");
            return;
        };
        let removed = self
            .channel_mut(name)
            .is_some_and(|c| c.members.remove(&id).is_some());
        if removed {
            trace!(channel = name, nick, "user parted");
            events.push(SessionEvent::Parted {
                channel: name.to_owned(),
                nickname: nick.to_owned(),
                reason: reason.map(str::to_owned),
            });
        }
    }

    fn on_quit(&mut self, nick: &str, reason: Option<&str>, events: &mut Vec<SessionEvent>) {
        if self.is_self(nick) {
            debug!(reason, "disconnected");
            self.close_all_channels(events);
            self.state = ConnectionState::Terminated;
        } else {
            let Some(id) = self.users.find(nick, self.casemap()) else {
                trace!(nick, "quit from unknown user");
                return;
            };
            self.forget_user(id);
        }
        events.push(SessionEvent::Quit {
            nickname: nick.to_owned(),
            reason: reason.map(str::to_owned),
        });
    }

    fn on_kick(
        &mut self,
        name: &str,
        nick: &str,
        by: Option<&str>,
        reason: Option<&str>,
        events: &mut Vec<SessionEvent>,
    ) {
        let kicked = SessionEvent::Kicked {
            channel: name.to_owned(),
            nickname: nick.to_owned(),
            by: by.map(str::to_owned),
            reason: reason.map(str::to_owned),
        };

        if self.is_self(nick) {
            if self.channel(name).is_some_and(|c| c.open) {
                debug!(channel = name, by, "kicked from channel");
                events.push(kicked);
                self.close_channel(name, events);
            }
            return;
        }

        let Some(id) = self.users.find(nick, self.casemap()) else {
            trace!(nick, "kick of unknown user");
            return;
        };
        if self
            .channel_mut(name)
            .is_some_and(|c| c.members.remove(&id).is_some())
        {
            events.push(kicked);
        }
    }

    fn on_nick(&mut self, old: &str, new: &str, events: &mut Vec<SessionEvent>) {
        let casemap = self.casemap();
        let Some(id) = self.users.find(old, casemap) else {
            trace!(old, new, "nick change from unknown user");
            return;
        };
        if id != self.me && self.users.find(new, casemap) == Some(self.me) {
            warn!(old, new, "peer renamed to our own nickname, ignoring");
            return;
        }

        if let Some(stale) = self.users.rename(id, new, casemap) {
            warn!(nickname = new, "nickname collision, dropping stale user");
            for channel in self.channels.values_mut() {
                channel.members.remove(&stale);
            }
        }
        if let Some(query) = self.queries.get_mut(&id) {
            query.nickname = new.to_owned();
        }
        if id == self.me {
            debug!(old, new, "own nickname changed");
        }
        events.push(SessionEvent::NickChanged {
            old: old.to_owned(),
            new: new.to_owned(),
        });
    }

    fn on_who_reply(&mut self, reply: &WhoReply) {
        let casemap = self.casemap();
        let id = self.users.ensure(&reply.nickname, casemap);
        if let Some(user) = self.users.get_mut(id) {
            user.username = Some(reply.username.clone());
            user.host = Some(reply.host.clone());
            user.server = Some(reply.server.clone());
            user.realname = Some(reply.realname.clone());
            user.away = reply.is_away();
            user.operator = reply.is_operator();
        }

        if reply.channel == "*" {
            return;
        }
        let status = ChannelStatus::from_modes(reply.status_modes(&self.support), &self.support);
        let capacity = self.config.journal_capacity;
        let channel = self
            .channels
            .entry(self.support.fold(&reply.channel))
            .or_insert_with(|| Channel::new(reply.channel.as_str(), capacity));
        if id != self.me || channel.open {
            channel.members.insert(id, status);
        }
    }

    /// Membership from a NAMES reply. Channels the client is not in are
    /// tracked too, without listing the client itself.
    fn on_names_reply(&mut self, reply: &NamesReply) {
        let casemap = self.casemap();
        let capacity = self.config.journal_capacity;
        let channel = self
            .channels
            .entry(self.support.fold(&reply.channel))
            .or_insert_with(|| Channel::new(reply.channel.as_str(), capacity));
        for (modes, nick) in reply.members(&self.support) {
            let id = self.users.ensure(nick, casemap);
            if id == self.me && !channel.open {
                continue;
            }
            channel
                .members
                .insert(id, ChannelStatus::from_modes(modes, &self.support));
        }
    }

    fn on_no_such_nick(&mut self, name: &str, events: &mut Vec<SessionEvent>) {
        if self.support.is_channel_name(name) {
            self.close_channel(name, events);
            return;
        }
        match self.users.find(name, self.casemap()) {
            Some(id) if id != self.me => {
                debug!(nick = name, "no such nick, forgetting user");
                self.forget_user(id);
            }
            _ => {}
        }
    }

    fn set_topic(
        &mut self,
        name: &str,
        topic: Option<&str>,
        setter: Option<String>,
        events: &mut Vec<SessionEvent>,
    ) {
        let Some(channel) = self.channel_mut(name) else {
            trace!(channel = name, "topic for unknown channel");
            return;
        };
        let topic = topic.filter(|t| !t.is_empty()).map(str::to_owned);
        let changed = channel.topic != topic;
        channel.topic = topic.clone();
        if setter.is_some() {
            channel.topic_setter = setter;
            channel.topic_set_time = Some(Utc::now());
        } else if topic.is_none() {
            channel.topic_setter = None;
            channel.topic_set_time = None;
        }
        if changed {
            events.push(SessionEvent::TopicChanged {
                channel: channel.name().to_owned(),
                topic,
            });
        }
    }

    fn apply_channel_modes(
        &mut self,
        name: &str,
        changes: &ModeChangeSet,
        replace: bool,
        events: &mut Vec<SessionEvent>,
    ) {
        let key = self.support.fold(name);
        let Some(channel) = self.channels.get_mut(&key) else {
            trace!(channel = name, "modes for unknown channel");
            return;
        };
        if replace {
            channel.modes.clear_settings();
        }

        for change in changes.iter() {
            if !matches!(self.support.mode_kind(change.letter), ModeKind::Status) {
                channel.modes.apply(change, &self.support);
                continue;
            }
            let Some(target) = change.argument.as_deref() else {
                continue;
            };
            let status = self
                .users
                .find(target, self.support.casemapping)
                .and_then(|id| channel.members.get_mut(&id));
            match (status, change.action) {
                (Some(status), ModeAction::Add) => status.add(change.letter, &self.support),
                (Some(status), ModeAction::Remove) => status.remove(change.letter),
                (None, _) => {
                    warn!(channel = name, nick = target, mode = %change.letter, "status change for non-member")
                }
            }
        }

        debug!(channel = name, count = changes.len(), "channel modes changed");
        events.push(SessionEvent::ModesChanged {
            target: channel.name().to_owned(),
            changes: changes.clone(),
        });
    }

    fn set_away(
        &mut self,
        nick: &str,
        away: bool,
        message: Option<&str>,
        events: &mut Vec<SessionEvent>,
    ) {
        let Some(user) = self.known_user_mut(nick) else {
            return;
        };
        let changed = user.away != away;
        user.away = away;
        user.away_message = message.map(str::to_owned);
        if changed {
            let nickname = user.nickname.clone();
            events.push(SessionEvent::AwayChanged { nickname, away });
        }
    }

    fn close_channel(&mut self, name: &str, events: &mut Vec<SessionEvent>) {
        if let Some(channel) = self.channel_mut(name).filter(|c| c.open) {
            channel.close();
            debug!(channel = %channel.name(), "channel closed");
            events.push(SessionEvent::ChannelClosed {
                channel: channel.name().to_owned(),
            });
        }
    }

    fn close_all_channels(&mut self, events: &mut Vec<SessionEvent>) {
        let mut open: Vec<&mut Channel> = self.channels.values_mut().filter(|c| c.open).collect();
        open.sort_by(|a, b| a.name().cmp(b.name()));
        for channel in open {
            channel.close();
            events.push(SessionEvent::ChannelClosed {
                channel: channel.name().to_owned(),
            });
        }
    }

    /// Drop a peer from every roster and from the peer table.
    fn forget_user(&mut self, id: UserId) {
        if id == self.me {
            return;
        }
        for channel in self.channels.values_mut() {
            channel.members.remove(&id);
        }
        self.users.remove(id, self.support.casemapping);
    }

    /// Rebuild name indexes after the case mapping changed.
    fn rekey(&mut self) {
        let casemap = self.casemap();
        for id in self.users.rekey(casemap) {
            for channel in self.channels.values_mut() {
                channel.members.remove(&id);
            }
        }
        // On collision the open channel wins, then the lowest name.
        let mut channels: Vec<Channel> = std::mem::take(&mut self.channels).into_values().collect();
        channels.sort_by(|a, b| (!a.open, a.name()).cmp(&(!b.open, b.name())));
        for channel in channels {
            let key = casemap.fold(channel.name());
            self.channels.entry(key).or_insert(channel);
        }
        debug!(casemapping = casemap.as_str(), "re-keyed session tables");
    }

    /// Handle of a query whose peer has gone and was last seen as `nickname`.
    fn detached_query(&self, nickname: &str) -> Option<UserId> {
        let key = self.support.fold(nickname);
        self.queries
            .values()
            .find(|q| self.users.get(q.peer).is_none() && self.support.fold(&q.nickname) == key)
            .map(Query::peer)
    }

    /// Move a query left behind by a departed peer onto the user now
    /// holding its nickname.
    fn reattach_query(&mut self, id: UserId, nickname: &str) {
        if self.queries.contains_key(&id) {
            return;
        }
        let Some(mut query) = self
            .detached_query(nickname)
            .and_then(|stale| self.queries.remove(&stale))
        else {
            return;
        };
        trace!(nick = nickname, "query reattached");
        query.peer = id;
        query.nickname = nickname.to_owned();
        self.queries.insert(id, query);
    }

    /// Route a message to the channel or query journals it belongs to,
    /// falling back to the server journal.
    fn record(&mut self, message: &Message, events: &mut Vec<SessionEvent>) {
        let mut routed = false;
        let keys: Vec<String> = message
            .channel_targets(&self.support)
            .into_iter()
            .map(|t| self.support.fold(t))
            .collect();
        for key in keys {
            if let Some(channel) = self.channels.get_mut(&key) {
                channel.journal.push(message.clone());
                routed = true;
            }
        }

        if !routed {
            let to_me = message
                .query_targets(&self.support)
                .into_iter()
                .any(|t| self.is_self(t));
            if let (true, Some(sender)) = (to_me, message.source_nickname()) {
                let id = self.users.ensure(sender, self.casemap());
                self.reattach_query(id, sender);
                let capacity = self.config.journal_capacity;
                let query = self.queries.entry(id).or_insert_with(|| {
                    debug!(nick = sender, "query opened");
                    events.push(SessionEvent::QueryOpened {
                        nickname: sender.to_owned(),
                    });
                    Query::new(id, sender, capacity)
                });
                query.journal.push(message.clone());
                routed = true;
            }
        }

        if !routed {
            self.server_journal.push(message.clone());
        }
    }
}
